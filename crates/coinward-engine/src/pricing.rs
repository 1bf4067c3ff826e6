//! Gold pricing and merchant modifier resolution.
//!
//! Prices are always computed in gold, the unit of account. Results are
//! rounded to five decimal places so that floating drift cannot build up
//! across repeated additions within a batch.

use rust_decimal::Decimal;

use coinward_types::{PriceModifiers, TradeKind};

use crate::error::CoinError;

/// Decimal places retained on every computed price.
pub const PRICE_SCALE: u32 = 5;

/// The no-markup modifier applied to free kinds.
const NEUTRAL_MODIFIER: u32 = 100;

/// Compute the gold cost of an item stack.
///
/// `modifier_percent` is a whole percentage (100 = no markup, 110 = +10%).
/// The result is `(base_price * modifier / 100) * quantity`, rounded to
/// [`PRICE_SCALE`] decimal places.
pub fn price_in_gold(
    base_price: Decimal,
    modifier_percent: u32,
    quantity: u32,
) -> Result<Decimal, CoinError> {
    let modifier = Decimal::from(modifier_percent)
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(|| arithmetic("modifier percent to fraction"))?;
    let unit = base_price
        .checked_mul(modifier)
        .ok_or_else(|| arithmetic("unit price with modifier"))?;
    let total = unit
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| arithmetic("stack price"))?;
    Ok(total.round_dp(PRICE_SCALE))
}

/// Resolve the effective price modifier for a trade kind.
///
/// The modifier named for the merchant's own action applies to the
/// player's opposite action: a player buying pays the merchant's *sell*
/// percent, a player selling is paid the merchant's *buy* percent. Free
/// kinds always price at 100 (their total is discarded anyway).
pub const fn effective_modifier(kind: TradeKind, merchant: PriceModifiers) -> u32 {
    match kind {
        TradeKind::Buy => merchant.sell,
        TradeKind::Sell => merchant.buy,
        TradeKind::Loot | TradeKind::Give => NEUTRAL_MODIFIER,
    }
}

fn arithmetic(context: &str) -> CoinError {
    CoinError::ArithmeticOverflow {
        context: context.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn neutral_modifier_is_identity() {
        let price = Decimal::new(34999, 4); // 3.4999
        let priced = price_in_gold(price, 100, 1).unwrap();
        assert_eq!(priced, price.round_dp(PRICE_SCALE));
    }

    #[test]
    fn modifier_scales_price() {
        let priced = price_in_gold(Decimal::from(10_u32), 110, 1).unwrap();
        assert_eq!(priced, Decimal::from(11_u32));
    }

    #[test]
    fn quantity_multiplies_price() {
        let priced = price_in_gold(Decimal::new(15, 1), 100, 4).unwrap();
        assert_eq!(priced, Decimal::from(6_u32));
    }

    #[test]
    fn result_is_rounded_to_five_places() {
        // 1/3 of a gold piece priced at 100% keeps exactly five places.
        let third = Decimal::ONE.checked_div(Decimal::from(3_u32)).unwrap();
        let priced = price_in_gold(third, 100, 1).unwrap();
        assert_eq!(priced, Decimal::new(33333, 5));
    }

    #[test]
    fn buy_uses_merchant_sell_percent() {
        let merchant = PriceModifiers { buy: 80, sell: 120 };
        assert_eq!(effective_modifier(TradeKind::Buy, merchant), 120);
        assert_eq!(effective_modifier(TradeKind::Sell, merchant), 80);
        assert_eq!(effective_modifier(TradeKind::Loot, merchant), 100);
        assert_eq!(effective_modifier(TradeKind::Give, merchant), 100);
    }
}
