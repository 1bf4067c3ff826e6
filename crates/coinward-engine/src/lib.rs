//! Trade settlement, currency smoothing, and distribution for Coinward.
//!
//! This crate is the logic layer of the workspace: it prices items,
//! verifies affordability, moves value between purses while normalizing
//! fractional denominations into valid integer coin counts, and splits
//! pooled balances across recipients. It operates on snapshots from
//! `coinward-types` and awaits external collaborators (ports) for item
//! relocation, balance storage, and notification -- it performs no durable
//! writes of its own.
//!
//! # Modules
//!
//! - [`config`] -- Table-wide configuration ([`TableConfig`])
//! - [`convert`] -- Reference-unit conversion and the smoothing pass
//! - [`distribution`] -- Equal-share splitting of pooled balances
//! - [`error`] -- Error types for all engine operations
//! - [`ports`] -- External collaborator traits ([`ItemMover`] and friends)
//! - [`pricing`] -- Gold pricing and merchant modifier resolution
//! - [`trade`] -- Batch orchestration and the single-item entry point
//! - [`transfer`] -- The funds transfer engine ([`SettlementMode`])

pub mod config;
pub mod convert;
pub mod distribution;
pub mod error;
pub mod ports;
pub mod pricing;
pub mod trade;
pub mod transfer;

// Re-export primary types at crate root for convenience.
pub use config::TableConfig;
pub use convert::{cost_vector, from_reference_unit, smoothen, to_reference_unit};
pub use distribution::{distribute, split_purse};
pub use error::{CoinError, TradeError, TransferError};
pub use ports::{
    ItemMover, PortError, PurseVault, RecipientResolver, SilentReporter, TradeReporter,
};
pub use pricing::{PRICE_SCALE, effective_modifier, price_in_gold};
pub use trade::{settle_batch, settle_single};
pub use transfer::{SettlementMode, TransferOutcome, transfer};
