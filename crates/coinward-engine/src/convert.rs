//! Denomination conversion and the smoothing pass.
//!
//! Three pure operations over balances:
//!
//! - [`to_reference_unit`] -- collapse a balance to a platinum-equivalent
//!   scalar for wealth comparison.
//! - [`from_reference_unit`] -- the all-platinum representation used by the
//!   convert-to-reference settlement mode.
//! - [`smoothen`] -- normalize a fractional working balance into
//!   non-negative integer coin counts without losing fractional value.
//!
//! [`cost_vector`] additionally expresses a gold cost simultaneously in
//! every denomination so the transfer engine can compare and settle in
//! whichever tier it selects.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use coinward_types::{Denomination, ExchangeRates, Purse, RawPurse};

use crate::error::CoinError;

/// Shorthand for the overflow error with a static context string.
fn overflow(context: &str) -> CoinError {
    CoinError::ArithmeticOverflow {
        context: context.to_owned(),
    }
}

/// Convert a full balance to a single platinum-equivalent scalar.
///
/// Each denomination's amount is weighted by its gold value, summed, and
/// divided by the platinum rate. Purely additive -- no rounding happens
/// here; the caller decides when to round.
pub fn to_reference_unit(balance: &RawPurse, rates: &ExchangeRates) -> Result<Decimal, CoinError> {
    let mut total_gold = Decimal::ZERO;
    for denomination in Denomination::ALL {
        let gold_value = rates
            .gold_value(denomination)
            .ok_or(CoinError::InvalidRate { denomination })?;
        let in_gold = balance
            .amount(denomination)
            .checked_mul(gold_value)
            .ok_or_else(|| overflow("denomination amount to gold units"))?;
        total_gold = total_gold
            .checked_add(in_gold)
            .ok_or_else(|| overflow("reference-unit accumulation"))?;
    }
    total_gold
        .checked_div(rates.platinum_to_gold)
        .ok_or(CoinError::InvalidRate {
            denomination: Denomination::Platinum,
        })
}

/// The all-platinum representation of a reference-unit amount.
///
/// Zeroes every denomination and sets platinum to the given amount. Lossy
/// by design -- all value aggregates into platinum -- and only used when
/// the convert-to-reference settlement mode is selected.
pub const fn from_reference_unit(platinum: Decimal) -> RawPurse {
    RawPurse {
        pp: platinum,
        gp: Decimal::ZERO,
        ep: Decimal::ZERO,
        sp: Decimal::ZERO,
        cp: Decimal::ZERO,
    }
}

/// Normalize a fractional working balance into integer coin counts.
///
/// A single top-down pass; each denomination is processed exactly once:
///
/// 1. Negative values are clamped to zero. Negative balances are not
///    expected after the affordability gate, so the clamp never fires on
///    a well-formed transfer.
/// 2. The integer part is kept as the settled coin count.
/// 3. The fractional part is converted into the next lower tier's units
///    and added to that tier's running value before the tier is itself
///    processed. Platinum's fraction cascades using platinum's own rate.
/// 4. Copper has no lower tier; residual fraction there is truncated.
///
/// The cascade never cycles back up, so total reference-unit value is
/// preserved modulo the copper truncation.
pub fn smoothen(balance: RawPurse, rates: &ExchangeRates) -> Result<Purse, CoinError> {
    let mut working = balance;
    let mut settled = Purse::EMPTY;

    for denomination in Denomination::ALL {
        let mut value = working.amount(denomination);
        if value.is_sign_negative() {
            value = Decimal::ZERO;
        }

        let whole = value.trunc();
        let fraction = value
            .checked_sub(whole)
            .ok_or_else(|| overflow("fractional split in smoothing"))?;
        let coins = whole
            .to_u64()
            .ok_or_else(|| overflow("settled coin count exceeds u64"))?;
        settled.set_amount(denomination, coins);

        if let (Some(lower), Some(rate)) = (denomination.lower(), rates.to_lower(denomination)) {
            let carried = fraction
                .checked_mul(rate)
                .ok_or_else(|| overflow("fraction carry to lower tier"))?;
            let lower_value = working
                .amount(lower)
                .checked_add(carried)
                .ok_or_else(|| overflow("lower tier accumulation"))?;
            working.set_amount(lower, lower_value);
        }
    }

    Ok(settled)
}

/// Express a gold cost simultaneously in every denomination.
///
/// The entries are not summed: each denomination holds the full cost in
/// that tier's units, for later comparison and single-tier settlement.
pub fn cost_vector(cost_in_gold: Decimal, rates: &ExchangeRates) -> Result<RawPurse, CoinError> {
    let mut vector = RawPurse::default();
    for denomination in Denomination::ALL {
        let gold_value = rates
            .gold_value(denomination)
            .ok_or(CoinError::InvalidRate { denomination })?;
        let cost = cost_in_gold
            .checked_div(gold_value)
            .ok_or(CoinError::InvalidRate { denomination })?;
        vector.set_amount(denomination, cost);
    }
    Ok(vector)
}
