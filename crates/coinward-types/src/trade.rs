//! Trade kinds, item references, party snapshots, and receipts.
//!
//! These are transient values constructed fresh per call from externally
//! supplied actor state. The engine receives snapshots, computes new
//! snapshots, and hands them back; it performs no durable writes of its own.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, ItemId, ReceiptId};
use crate::purse::Purse;

// ---------------------------------------------------------------------------
// Trade kinds
// ---------------------------------------------------------------------------

/// The kind of exchange requested for one batch entry.
///
/// The enum is closed and matched exhaustively everywhere, so adding a kind
/// is a compile-time-checked exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    /// Player pays the counter-party and receives items.
    Buy,
    /// Player hands items to the counter-party and is paid.
    Sell,
    /// Player takes items from the counter-party for free.
    Loot,
    /// Player hands items to the counter-party for free.
    Give,
}

impl TradeKind {
    /// All trade kinds in batch-processing order.
    pub const ALL: [Self; 4] = [Self::Buy, Self::Sell, Self::Loot, Self::Give];

    /// `true` for kinds that move no funds.
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Loot | Self::Give)
    }

    /// `true` for kinds whose items move from the counter-party to the
    /// player party.
    pub const fn player_receives(self) -> bool {
        matches!(self, Self::Buy | Self::Loot)
    }

    /// The short tag used by host systems for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Loot => "loot",
            Self::Give => "give",
        }
    }
}

impl core::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ---------------------------------------------------------------------------
// Items and modifiers
// ---------------------------------------------------------------------------

/// A priced item reference inside a trade request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// The item being transferred.
    pub item_id: ItemId,
    /// Human-readable item name, used only in diagnostics and reports.
    pub name: String,
    /// Unit price in gold before any merchant modifier.
    pub unit_price_gold: Decimal,
    /// Quantity requested; the engine clamps this to the quantity actually
    /// available at the source.
    pub quantity: u32,
}

/// Per-party percentage price modifiers, attached to the party acting as
/// merchant.
///
/// Values are whole percentages: 100 means no markup, 110 means +10%.
/// For a given trade, the effective modifier is the counter-party's
/// modifier for the *opposite* direction -- merchants buy low and sell
/// high, so a player buying pays the merchant's sell percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModifiers {
    /// Percentage applied when this party buys from the player.
    pub buy: u32,
    /// Percentage applied when this party sells to the player.
    pub sell: u32,
}

impl Default for PriceModifiers {
    fn default() -> Self {
        Self { buy: 100, sell: 100 }
    }
}

// ---------------------------------------------------------------------------
// Party snapshots and batches
// ---------------------------------------------------------------------------

/// Snapshot of one trading party's state at the start of a call.
///
/// The engine mutates the snapshot in memory as kinds settle; the caller is
/// responsible for persisting the result, which eliminates aliasing between
/// before and after state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderState {
    /// The party this snapshot belongs to.
    pub actor_id: ActorId,
    /// Display name, used only in diagnostics and reports.
    pub name: String,
    /// The party's settled currency balance.
    pub purse: Purse,
    /// Quantity of each item the party currently holds.
    pub stock: BTreeMap<ItemId, u32>,
    /// Price modifiers applied when this party acts as merchant, or `None`
    /// when the party carries none; the engine then falls back to the
    /// table-wide default (100/100).
    pub modifiers: Option<PriceModifiers>,
}

/// A batch of trade requests keyed by kind.
///
/// Kinds with empty item lists are skipped entirely: no balance mutation,
/// no item movement, no notification.
pub type TradeBatch = BTreeMap<TradeKind, Vec<ItemRequest>>;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// The resolution of a single trade kind within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// Identifier for this resolution.
    pub receipt_id: ReceiptId,
    /// The kind that was resolved.
    pub kind: TradeKind,
    /// The party items moved away from.
    pub source: ActorId,
    /// The party items moved to.
    pub destination: ActorId,
    /// The items actually moved, after stock filtering and relocation.
    pub moved: Vec<ItemRequest>,
    /// Items dropped at filter time because the source no longer held them.
    pub dropped: Vec<ItemId>,
    /// Total price of the moved items in gold (zero for free kinds).
    pub total_gold: Decimal,
    /// `false` when the kind was rejected for insufficient funds; a rejected
    /// kind moved no items and mutated no balances.
    pub settled: bool,
}

/// The result of splitting a pooled balance across eligible recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOutcome {
    /// The identical share credited to every recipient.
    pub share: Purse,
    /// The recipients that received a share, in resolution order.
    pub recipients: Vec<ActorId>,
    /// The indivisible remainder. The source's purse is reset to zero
    /// regardless, so this value is consumed by the split rather than
    /// retained; it is surfaced here for reporting only.
    pub discarded: Purse,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn free_kinds_move_no_funds() {
        assert!(!TradeKind::Buy.is_free());
        assert!(!TradeKind::Sell.is_free());
        assert!(TradeKind::Loot.is_free());
        assert!(TradeKind::Give.is_free());
    }

    #[test]
    fn direction_matches_kind() {
        assert!(TradeKind::Buy.player_receives());
        assert!(TradeKind::Loot.player_receives());
        assert!(!TradeKind::Sell.player_receives());
        assert!(!TradeKind::Give.player_receives());
    }

    #[test]
    fn kind_serializes_to_host_tag() {
        for kind in TradeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
        }
    }

    #[test]
    fn modifiers_default_to_no_markup() {
        let modifiers = PriceModifiers::default();
        assert_eq!(modifiers.buy, 100);
        assert_eq!(modifiers.sell, 100);
    }
}
