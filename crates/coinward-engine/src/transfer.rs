//! The funds transfer engine.
//!
//! Moves a gold-denominated cost between two settled purses. The transfer
//! is a pure function: inputs are borrowed, outputs are fresh values, and
//! the caller applies both updated purses or neither. The affordability
//! check is the only hard gate -- a rejected transfer performs no mutation
//! at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinward_types::{Denomination, ExchangeRates, Purse, RawPurse};

use crate::convert;
use crate::error::{CoinError, TransferError};

// ---------------------------------------------------------------------------
// Settlement mode
// ---------------------------------------------------------------------------

/// Policy governing how a transfer mutates the two purses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    /// Collapse both parties' value into platinum after the transfer.
    ///
    /// An explicit, documented lossy simplification: every denomination
    /// aggregates into platinum for payer and payee alike.
    ConvertToReference,
    /// Mutate only the denomination actually used to settle, then smoothen.
    #[default]
    DirectDenomination,
}

/// The two updated purses produced by a successful transfer.
///
/// Returned as one value so callers apply both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// The payer's purse after the cost was subtracted.
    pub payer: Purse,
    /// The payee's purse after the cost was added.
    pub payee: Purse,
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Move `cost_in_gold` from the payer's purse to the payee's purse.
///
/// Sequence:
///
/// 1. Express the cost simultaneously in every denomination.
/// 2. Compute both parties' platinum-equivalent wealth.
/// 3. Reject with [`TransferError::InsufficientFunds`] when the platinum
///    cost exceeds the payer's platinum-equivalent -- the only hard gate.
/// 4. Settle per mode and smoothen so both results hold only non-negative
///    integers.
///
/// Direct-denomination settlement prefers gold (the pricing unit) when the
/// payer holds enough gold coins, and otherwise falls back to platinum,
/// the highest-value tier least likely to also be short. Known limitation:
/// there is no further fallback that combines denominations when neither
/// gold nor platinum alone covers the cost after smoothing.
pub fn transfer(
    payer: &Purse,
    payee: &Purse,
    cost_in_gold: Decimal,
    rates: &ExchangeRates,
    mode: SettlementMode,
) -> Result<TransferOutcome, TransferError> {
    let cost = convert::cost_vector(cost_in_gold, rates)?;
    let payer_pp = convert::to_reference_unit(&RawPurse::from(*payer), rates)?;
    let payee_pp = convert::to_reference_unit(&RawPurse::from(*payee), rates)?;

    if cost.pp > payer_pp {
        tracing::warn!(
            required_pp = %cost.pp,
            available_pp = %payer_pp,
            "transfer rejected: payer cannot afford cost"
        );
        return Err(TransferError::InsufficientFunds {
            required_pp: cost.pp,
            available_pp: payer_pp,
        });
    }

    let outcome = match mode {
        SettlementMode::ConvertToReference => settle_in_reference(payer_pp, payee_pp, cost.pp, rates)?,
        SettlementMode::DirectDenomination => settle_direct(payer, payee, &cost, rates)?,
    };

    tracing::debug!(
        cost_gold = %cost_in_gold,
        payer_after = %outcome.payer,
        payee_after = %outcome.payee,
        "transfer settled"
    );
    Ok(outcome)
}

/// Settle by moving platinum-equivalent scalars and collapsing both purses
/// to all-platinum.
fn settle_in_reference(
    payer_pp: Decimal,
    payee_pp: Decimal,
    cost_pp: Decimal,
    rates: &ExchangeRates,
) -> Result<TransferOutcome, CoinError> {
    let payer_after = payer_pp.checked_sub(cost_pp).ok_or_else(|| overflow("payer reference subtraction"))?;
    let payee_after = payee_pp.checked_add(cost_pp).ok_or_else(|| overflow("payee reference addition"))?;
    Ok(TransferOutcome {
        payer: convert::smoothen(convert::from_reference_unit(payer_after), rates)?,
        payee: convert::smoothen(convert::from_reference_unit(payee_after), rates)?,
    })
}

/// Settle in a single denomination -- gold when the payer holds enough
/// gold coins, platinum otherwise -- then smoothen both purses.
fn settle_direct(
    payer: &Purse,
    payee: &Purse,
    cost: &RawPurse,
    rates: &ExchangeRates,
) -> Result<TransferOutcome, CoinError> {
    let tier = if Decimal::from(payer.gp) >= cost.gp {
        Denomination::Gold
    } else {
        Denomination::Platinum
    };
    let amount = cost.amount(tier);

    let mut payer_raw = RawPurse::from(*payer);
    let mut payee_raw = RawPurse::from(*payee);

    let payer_tier = payer_raw
        .amount(tier)
        .checked_sub(amount)
        .ok_or_else(|| overflow("payer tier subtraction"))?;
    payer_raw.set_amount(tier, payer_tier);

    let payee_tier = payee_raw
        .amount(tier)
        .checked_add(amount)
        .ok_or_else(|| overflow("payee tier addition"))?;
    payee_raw.set_amount(tier, payee_tier);

    Ok(TransferOutcome {
        payer: convert::smoothen(payer_raw, rates)?,
        payee: convert::smoothen(payee_raw, rates)?,
    })
}

fn overflow(context: &str) -> CoinError {
    CoinError::ArithmeticOverflow {
        context: context.to_owned(),
    }
}
