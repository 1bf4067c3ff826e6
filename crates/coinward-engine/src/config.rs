//! Table-wide configuration for the trade engine.
//!
//! An enclosing application constructs this once (typically deserialized
//! from its settings store) and passes it into every call. The engine never
//! reads ambient global state.

use serde::{Deserialize, Serialize};

use coinward_types::{ExchangeRates, PriceModifiers};

use crate::transfer::SettlementMode;

/// Configuration shared by every trade at one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// How transfers settle: collapse to platinum, or mutate only the
    /// denomination actually used (the default).
    pub settlement: SettlementMode,

    /// The exchange-rate chain between adjacent coin tiers. Read-only
    /// during a transaction.
    pub rates: ExchangeRates,

    /// Modifiers applied for merchants that carry none of their own
    /// (100/100 -- no markup, no markdown).
    pub fallback_modifiers: PriceModifiers,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_direct_settlement_without_markup() {
        let config = TableConfig::default();
        assert_eq!(config.settlement, SettlementMode::DirectDenomination);
        assert_eq!(config.fallback_modifiers, PriceModifiers::default());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: TableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn settlement_mode_uses_snake_case_tags() {
        let json = serde_json::to_string(&SettlementMode::ConvertToReference).unwrap();
        assert_eq!(json, "\"convert_to_reference\"");
    }
}
