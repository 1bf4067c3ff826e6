//! External collaborator interfaces consumed by the orchestration layer.
//!
//! The engine owns no actor storage, no item documents, and no user-facing
//! channel. Each of those concerns is a port: a trait the enclosing
//! application implements against its host platform. Orchestration awaits
//! every port call, so these are exactly the suspension points of a trade --
//! between awaits, computation is synchronous and total-orderable.
//!
//! Ports are consumed through generics rather than trait objects because
//! async trait methods are not dyn-compatible.

use coinward_types::{ActorId, DistributionOutcome, ItemRequest, Purse, TradeReceipt};

/// Errors surfaced by external collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// Item relocation failed; the collaborator moved nothing.
    #[error("item relocation failed: {reason}")]
    Relocation {
        /// Description from the relocation collaborator.
        reason: String,
    },

    /// An external balance write failed.
    #[error("balance storage failed: {reason}")]
    Storage {
        /// Description from the storage collaborator.
        reason: String,
    },
}

/// Reassigns item ownership between two parties.
#[allow(async_fn_in_trait)]
pub trait ItemMover {
    /// Move the given item list from `source` to `destination`.
    ///
    /// Must be atomic per call -- all-or-nothing reassignment of the given
    /// item/quantity list -- and must return the concrete list actually
    /// moved after the collaborator's own independent re-validation.
    async fn move_items(
        &mut self,
        source: ActorId,
        destination: ActorId,
        items: &[ItemRequest],
    ) -> Result<Vec<ItemRequest>, PortError>;
}

/// Resolves which parties are eligible to receive a distribution share.
#[allow(async_fn_in_trait)]
pub trait RecipientResolver {
    /// The recipients eligible for a split of `holder`'s balance.
    ///
    /// A pure view of current permission/observer state; an empty result
    /// makes the distribution a no-op.
    async fn eligible_recipients(&self, holder: ActorId) -> Vec<ActorId>;
}

/// Writes distribution shares into externally stored balances.
#[allow(async_fn_in_trait)]
pub trait PurseVault {
    /// Add `share` onto the recipient's existing balance -- additive,
    /// never overwritten.
    async fn credit(&mut self, recipient: ActorId, share: &Purse) -> Result<(), PortError>;
}

/// User-facing notification channel. Fire-and-forget: the engine consumes
/// no return value from any report.
#[allow(async_fn_in_trait)]
pub trait TradeReporter {
    /// Report a resolved trade kind.
    async fn report_trade(&mut self, receipt: &TradeReceipt);

    /// Report a rejected payer and the shortfall message.
    async fn report_insufficient_funds(&mut self, actor: ActorId, message: &str);

    /// Report a completed distribution.
    async fn report_distribution(&mut self, outcome: &DistributionOutcome);
}

/// A reporter that swallows every notification.
///
/// Useful for callers that surface outcomes through the returned receipts
/// instead of a chat channel, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl SilentReporter {
    /// Create a new silent reporter.
    pub const fn new() -> Self {
        Self
    }
}

impl TradeReporter for SilentReporter {
    async fn report_trade(&mut self, _receipt: &TradeReceipt) {}

    async fn report_insufficient_funds(&mut self, _actor: ActorId, _message: &str) {}

    async fn report_distribution(&mut self, _outcome: &DistributionOutcome) {}
}
