//! Shared type definitions for the Coinward trade and currency engine.
//!
//! This crate is the single source of truth for the data model used across
//! the Coinward workspace. It holds pure data: no arithmetic beyond checked
//! accessors, no I/O, no policy. The engine crate operates on these types
//! and hands new snapshots back to the caller for persistence.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for actors, items, and receipts
//! - [`denomination`] -- The five coin tiers and the fixed exchange-rate chain
//! - [`purse`] -- Settled ([`Purse`]) and in-flight ([`RawPurse`]) balances
//! - [`trade`] -- Trade kinds, item requests, party snapshots, receipts

pub mod denomination;
pub mod ids;
pub mod purse;
pub mod trade;

// Re-export all public types at crate root for convenience.
pub use denomination::{Denomination, ExchangeRates};
pub use ids::{ActorId, ItemId, ReceiptId};
pub use purse::{Purse, RawPurse};
pub use trade::{
    DistributionOutcome, ItemRequest, PriceModifiers, TradeBatch, TradeKind, TradeReceipt,
    TraderState,
};
