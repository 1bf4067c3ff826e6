//! Settled and in-flight currency balances.
//!
//! A [`Purse`] is a settled balance: exactly five non-negative integer coin
//! counts, one per [`Denomination`]. A [`RawPurse`] is the fractional
//! working form used inside a transaction; only the engine's smoothing pass
//! turns a raw purse back into a settled one, so no externally observable
//! balance ever carries a fractional or negative value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::denomination::Denomination;

// ---------------------------------------------------------------------------
// Settled purse
// ---------------------------------------------------------------------------

/// A settled currency balance: integer coin counts per denomination.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Purse {
    /// Platinum pieces.
    pub pp: u64,
    /// Gold pieces.
    pub gp: u64,
    /// Electrum pieces.
    pub ep: u64,
    /// Silver pieces.
    pub sp: u64,
    /// Copper pieces.
    pub cp: u64,
}

impl Purse {
    /// A purse holding no coins of any denomination.
    pub const EMPTY: Self = Self {
        pp: 0,
        gp: 0,
        ep: 0,
        sp: 0,
        cp: 0,
    };

    /// The coin count for the given denomination.
    pub const fn amount(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Platinum => self.pp,
            Denomination::Gold => self.gp,
            Denomination::Electrum => self.ep,
            Denomination::Silver => self.sp,
            Denomination::Copper => self.cp,
        }
    }

    /// Set the coin count for the given denomination.
    pub const fn set_amount(&mut self, denomination: Denomination, value: u64) {
        match denomination {
            Denomination::Platinum => self.pp = value,
            Denomination::Gold => self.gp = value,
            Denomination::Electrum => self.ep = value,
            Denomination::Silver => self.sp = value,
            Denomination::Copper => self.cp = value,
        }
    }

    /// `true` when every denomination is zero.
    pub const fn is_empty(&self) -> bool {
        self.pp == 0 && self.gp == 0 && self.ep == 0 && self.sp == 0 && self.cp == 0
    }

    /// Merge another purse into this one, denomination by denomination.
    ///
    /// Returns `None` if any coin count overflows `u64`.
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        let Some(pp) = self.pp.checked_add(other.pp) else {
            return None;
        };
        let Some(gp) = self.gp.checked_add(other.gp) else {
            return None;
        };
        let Some(ep) = self.ep.checked_add(other.ep) else {
            return None;
        };
        let Some(sp) = self.sp.checked_add(other.sp) else {
            return None;
        };
        let Some(cp) = self.cp.checked_add(other.cp) else {
            return None;
        };
        Some(Self { pp, gp, ep, sp, cp })
    }
}

impl core::fmt::Display for Purse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}pp {}gp {}ep {}sp {}cp",
            self.pp, self.gp, self.ep, self.sp, self.cp
        )
    }
}

// ---------------------------------------------------------------------------
// In-flight purse
// ---------------------------------------------------------------------------

/// The fractional working form of a balance used during settlement.
///
/// Intermediate computation is allowed to hold fractional (and, transiently,
/// negative) values here; the smoothing pass in the engine is the only path
/// back to a [`Purse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPurse {
    /// Platinum pieces, possibly fractional.
    pub pp: Decimal,
    /// Gold pieces, possibly fractional.
    pub gp: Decimal,
    /// Electrum pieces, possibly fractional.
    pub ep: Decimal,
    /// Silver pieces, possibly fractional.
    pub sp: Decimal,
    /// Copper pieces, possibly fractional.
    pub cp: Decimal,
}

impl RawPurse {
    /// The amount for the given denomination.
    pub const fn amount(&self, denomination: Denomination) -> Decimal {
        match denomination {
            Denomination::Platinum => self.pp,
            Denomination::Gold => self.gp,
            Denomination::Electrum => self.ep,
            Denomination::Silver => self.sp,
            Denomination::Copper => self.cp,
        }
    }

    /// Set the amount for the given denomination.
    pub const fn set_amount(&mut self, denomination: Denomination, value: Decimal) {
        match denomination {
            Denomination::Platinum => self.pp = value,
            Denomination::Gold => self.gp = value,
            Denomination::Electrum => self.ep = value,
            Denomination::Silver => self.sp = value,
            Denomination::Copper => self.cp = value,
        }
    }
}

impl From<Purse> for RawPurse {
    fn from(purse: Purse) -> Self {
        Self {
            pp: Decimal::from(purse.pp),
            gp: Decimal::from(purse.gp),
            ep: Decimal::from(purse.ep),
            sp: Decimal::from(purse.sp),
            cp: Decimal::from(purse.cp),
        }
    }
}
