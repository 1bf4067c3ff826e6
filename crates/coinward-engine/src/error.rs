//! Error types for the coinward-engine crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Insufficient funds is a normal, recoverable rejection scoped to a single
//! trade kind or transaction; arithmetic failures indicate malformed rates
//! or absurd quantities and surface with the context of the computation
//! that overflowed.

use rust_decimal::Decimal;

use coinward_types::Denomination;

use crate::ports::PortError;

/// Errors raised by currency arithmetic (conversion, smoothing, pricing).
#[derive(Debug, thiserror::Error)]
pub enum CoinError {
    /// A checked arithmetic step overflowed or lost representability.
    #[error("arithmetic overflow in currency computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A configured exchange rate is zero or produces an unusable chain.
    #[error("invalid exchange rate for denomination {denomination}")]
    InvalidRate {
        /// The denomination whose rate could not be applied.
        denomination: Denomination,
    },
}

/// Errors raised by the funds transfer engine.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The payer's reference-unit balance is below the cost.
    ///
    /// This is the only hard gate in a transfer; when it fires, no
    /// mutation has occurred on either balance.
    #[error("insufficient funds: cost is {required_pp} pp but payer holds {available_pp} pp")]
    InsufficientFunds {
        /// The cost expressed in platinum units.
        required_pp: Decimal,
        /// The payer's total wealth expressed in platinum units.
        available_pp: Decimal,
    },

    /// A currency computation failed during the transfer.
    #[error("currency error during transfer: {0}")]
    Coin(#[from] CoinError),
}

/// Errors raised by trade orchestration and distribution.
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    /// A funds transfer failed for a reason other than affordability.
    ///
    /// Affordability rejections are handled inside the orchestrator (the
    /// kind aborts, the payer is notified, the batch continues) and never
    /// surface through this variant.
    #[error("transfer error during trade: {0}")]
    Transfer(#[from] TransferError),

    /// A currency computation failed outside the transfer step.
    #[error("currency error during trade: {0}")]
    Coin(#[from] CoinError),

    /// An external collaborator (item relocation, balance storage) failed.
    #[error("collaborator error during trade: {0}")]
    Port(#[from] PortError),
}
