//! The five coin tiers and the fixed exchange-rate chain between them.
//!
//! Gold is the unit of account for pricing; platinum is the unit of account
//! for affordability comparisons. Rates are process-wide configuration,
//! read-only during a transaction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Denomination
// ---------------------------------------------------------------------------

/// One of the five coin tiers, each worth a fixed multiple of the next
/// lower tier.
///
/// Variants are declared highest tier first; [`Denomination::ALL`] preserves
/// that order for top-down passes such as smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Platinum pieces (`pp`) -- the reference unit for wealth comparison.
    Platinum,
    /// Gold pieces (`gp`) -- the unit of account for pricing.
    Gold,
    /// Electrum pieces (`ep`).
    Electrum,
    /// Silver pieces (`sp`).
    Silver,
    /// Copper pieces (`cp`) -- the lowest tier; fractional residue here
    /// has nowhere to cascade and is truncated.
    Copper,
}

impl Denomination {
    /// All denominations ordered highest to lowest.
    pub const ALL: [Self; 5] = [
        Self::Platinum,
        Self::Gold,
        Self::Electrum,
        Self::Silver,
        Self::Copper,
    ];

    /// The short tag used by host systems for this tier.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Platinum => "pp",
            Self::Gold => "gp",
            Self::Electrum => "ep",
            Self::Silver => "sp",
            Self::Copper => "cp",
        }
    }

    /// The next lower tier, or `None` for copper.
    pub const fn lower(self) -> Option<Self> {
        match self {
            Self::Platinum => Some(Self::Gold),
            Self::Gold => Some(Self::Electrum),
            Self::Electrum => Some(Self::Silver),
            Self::Silver => Some(Self::Copper),
            Self::Copper => None,
        }
    }
}

impl core::fmt::Display for Denomination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ---------------------------------------------------------------------------
// Exchange rates
// ---------------------------------------------------------------------------

/// Conversion rates between adjacent coin tiers.
///
/// Each field holds how many coins of the next lower tier one coin of the
/// named tier is worth. The defaults are the standard five-tier table
/// (1 pp = 10 gp, 1 gp = 2 ep, 1 ep = 5 sp, 1 sp = 10 cp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// Gold pieces per platinum piece.
    pub platinum_to_gold: Decimal,
    /// Electrum pieces per gold piece.
    pub gold_to_electrum: Decimal,
    /// Silver pieces per electrum piece.
    pub electrum_to_silver: Decimal,
    /// Copper pieces per silver piece.
    pub silver_to_copper: Decimal,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            platinum_to_gold: Decimal::from(10_u32),
            gold_to_electrum: Decimal::from(2_u32),
            electrum_to_silver: Decimal::from(5_u32),
            silver_to_copper: Decimal::from(10_u32),
        }
    }
}

impl ExchangeRates {
    /// Rate from the given tier into the next lower tier, or `None` for
    /// copper, which has no lower tier.
    pub const fn to_lower(&self, denomination: Denomination) -> Option<Decimal> {
        match denomination {
            Denomination::Platinum => Some(self.platinum_to_gold),
            Denomination::Gold => Some(self.gold_to_electrum),
            Denomination::Electrum => Some(self.electrum_to_silver),
            Denomination::Silver => Some(self.silver_to_copper),
            Denomination::Copper => None,
        }
    }

    /// Value of one coin of the given tier expressed in gold units.
    ///
    /// Returns `None` if any rate on the chain is zero or the product
    /// overflows, which only happens with malformed custom rates.
    pub fn gold_value(&self, denomination: Denomination) -> Option<Decimal> {
        match denomination {
            Denomination::Platinum => Some(self.platinum_to_gold),
            Denomination::Gold => Some(Decimal::ONE),
            Denomination::Electrum => Decimal::ONE.checked_div(self.gold_to_electrum),
            Denomination::Silver => {
                let chain = self.gold_to_electrum.checked_mul(self.electrum_to_silver)?;
                Decimal::ONE.checked_div(chain)
            }
            Denomination::Copper => {
                let chain = self
                    .gold_to_electrum
                    .checked_mul(self.electrum_to_silver)?
                    .checked_mul(self.silver_to_copper)?;
                Decimal::ONE.checked_div(chain)
            }
        }
    }

    /// Value of one copper piece expressed in platinum units.
    ///
    /// This is the epsilon used when comparing reference-unit totals that
    /// went through the smoothing pass.
    pub fn copper_in_platinum(&self) -> Option<Decimal> {
        self.gold_value(Denomination::Copper)?
            .checked_div(self.platinum_to_gold)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn all_is_ordered_high_to_low() {
        let mut walk = Some(Denomination::Platinum);
        for denomination in Denomination::ALL {
            assert_eq!(walk, Some(denomination));
            walk = denomination.lower();
        }
        assert_eq!(walk, None);
    }

    #[test]
    fn default_gold_values() {
        let rates = ExchangeRates::default();
        assert_eq!(
            rates.gold_value(Denomination::Platinum).unwrap(),
            Decimal::from(10_u32)
        );
        assert_eq!(rates.gold_value(Denomination::Gold).unwrap(), Decimal::ONE);
        assert_eq!(
            rates.gold_value(Denomination::Electrum).unwrap(),
            Decimal::new(5, 1)
        );
        assert_eq!(
            rates.gold_value(Denomination::Silver).unwrap(),
            Decimal::new(1, 1)
        );
        assert_eq!(
            rates.gold_value(Denomination::Copper).unwrap(),
            Decimal::new(1, 2)
        );
    }

    #[test]
    fn zero_rate_yields_none() {
        let rates = ExchangeRates {
            gold_to_electrum: Decimal::ZERO,
            ..ExchangeRates::default()
        };
        assert!(rates.gold_value(Denomination::Electrum).is_none());
    }

    #[test]
    fn tags_match_host_keys() {
        let tags: Vec<&str> = Denomination::ALL.iter().map(|d| d.tag()).collect();
        assert_eq!(tags, vec!["pp", "gp", "ep", "sp", "cp"]);
    }
}
