//! Trade orchestration: batch dispatch, stock filtering, pricing, and the
//! funds-then-items settlement sequence.
//!
//! 1. [`settle_batch`] -- resolve every non-empty kind in a trade batch.
//! 2. [`settle_single`] -- the direct entry point for one-item purchases.
//!
//! Each batch entry is processed independently and sequentially, never
//! retried. An affordability rejection aborts only its own kind: no items
//! move, the payer receives exactly one notification, and the remaining
//! kinds still proceed. Within one kind, the funds transfer completes (or
//! rejects) strictly before item relocation begins -- that ordering is
//! load-bearing, since it prevents handing over items for money that was
//! never verified.

use rust_decimal::Decimal;

use coinward_types::{
    ItemId, ItemRequest, ReceiptId, TradeBatch, TradeKind, TradeReceipt, TraderState,
};

use crate::config::TableConfig;
use crate::error::{CoinError, TradeError, TransferError};
use crate::ports::{ItemMover, TradeReporter};
use crate::{pricing, transfer};

/// Resolve every non-empty kind in a trade batch between the player party
/// and a counter-party.
///
/// Kinds with empty item lists are skipped entirely: no balance mutation,
/// no item movement, no notification. Returns one receipt per processed
/// kind, in batch order; a receipt with `settled == false` records an
/// affordability rejection that mutated nothing.
pub async fn settle_batch<M, R>(
    player: &mut TraderState,
    merchant: &mut TraderState,
    batch: &TradeBatch,
    config: &TableConfig,
    mover: &mut M,
    reporter: &mut R,
) -> Result<Vec<TradeReceipt>, TradeError>
where
    M: ItemMover,
    R: TradeReporter,
{
    let mut receipts = Vec::new();
    for (kind, requests) in batch {
        if requests.is_empty() {
            continue;
        }
        let receipt =
            settle_kind(player, merchant, *kind, requests, config, mover, reporter).await?;
        receipts.push(receipt);
    }
    Ok(receipts)
}

/// Settle a single-item purchase outside a batch.
///
/// Follows the same affordability-then-relocation sequence as a batch
/// `buy` entry for exactly one item; quantity is clamped to the seller's
/// available stock before pricing.
pub async fn settle_single<M, R>(
    buyer: &mut TraderState,
    seller: &mut TraderState,
    item: &ItemRequest,
    config: &TableConfig,
    mover: &mut M,
    reporter: &mut R,
) -> Result<TradeReceipt, TradeError>
where
    M: ItemMover,
    R: TradeReporter,
{
    let requests = [item.clone()];
    settle_kind(
        buyer,
        seller,
        TradeKind::Buy,
        &requests,
        config,
        mover,
        reporter,
    )
    .await
}

/// Resolve one trade kind end to end.
async fn settle_kind<M, R>(
    player: &mut TraderState,
    merchant: &mut TraderState,
    kind: TradeKind,
    requests: &[ItemRequest],
    config: &TableConfig,
    mover: &mut M,
    reporter: &mut R,
) -> Result<TradeReceipt, TradeError>
where
    M: ItemMover,
    R: TradeReporter,
{
    let merchant_modifiers = merchant.modifiers.unwrap_or(config.fallback_modifiers);
    let modifier = pricing::effective_modifier(kind, merchant_modifiers);

    // Items move source -> destination; the destination always pays,
    // because a party pays for what it receives.
    let (source, destination) = if kind.player_receives() {
        (&mut *merchant, &mut *player)
    } else {
        (&mut *player, &mut *merchant)
    };

    let (filtered, dropped) = filter_against_stock(source, kind, requests);
    if filtered.is_empty() {
        // Every requested item was gone from the source. Nothing to price,
        // move, or report beyond the per-item diagnostics already emitted.
        return Ok(TradeReceipt {
            receipt_id: ReceiptId::new(),
            kind,
            source: source.actor_id,
            destination: destination.actor_id,
            moved: Vec::new(),
            dropped,
            total_gold: Decimal::ZERO,
            settled: true,
        });
    }

    let total_gold = sum_prices(&filtered, modifier)?;

    if !kind.is_free() {
        match transfer::transfer(
            &destination.purse,
            &source.purse,
            total_gold,
            &config.rates,
            config.settlement,
        ) {
            Ok(outcome) => {
                destination.purse = outcome.payer;
                source.purse = outcome.payee;
            }
            Err(TransferError::InsufficientFunds {
                required_pp,
                available_pp,
            }) => {
                let message = format!(
                    "{} cannot afford {total_gold} gp (needs {required_pp} pp, holds {available_pp} pp)",
                    destination.name
                );
                reporter
                    .report_insufficient_funds(destination.actor_id, &message)
                    .await;
                return Ok(TradeReceipt {
                    receipt_id: ReceiptId::new(),
                    kind,
                    source: source.actor_id,
                    destination: destination.actor_id,
                    moved: Vec::new(),
                    dropped,
                    total_gold,
                    settled: false,
                });
            }
            Err(TransferError::Coin(error)) => return Err(TradeError::Coin(error)),
        }
    }

    // Funds are settled (or the kind is free); only now do items move.
    let moved = mover
        .move_items(source.actor_id, destination.actor_id, &filtered)
        .await?;
    apply_stock_changes(source, destination, &moved)?;

    let receipt = TradeReceipt {
        receipt_id: ReceiptId::new(),
        kind,
        source: source.actor_id,
        destination: destination.actor_id,
        moved,
        dropped,
        total_gold,
        settled: true,
    };
    tracing::debug!(
        kind = %kind,
        items = receipt.moved.len(),
        total_gold = %receipt.total_gold,
        "trade kind settled"
    );
    reporter.report_trade(&receipt).await;
    Ok(receipt)
}

/// Clamp each request to the quantity the source actually holds, dropping
/// items no longer present.
///
/// Dropped items are diagnostics, not failures: the trade proceeds with
/// the reduced set.
fn filter_against_stock(
    source: &TraderState,
    kind: TradeKind,
    requests: &[ItemRequest],
) -> (Vec<ItemRequest>, Vec<ItemId>) {
    let mut filtered = Vec::new();
    let mut dropped = Vec::new();
    for request in requests {
        let available = source.stock.get(&request.item_id).copied().unwrap_or(0);
        let quantity = request.quantity.min(available);
        if quantity == 0 {
            tracing::warn!(
                kind = %kind,
                item = %request.item_id,
                name = %request.name,
                "item no longer held by source; dropped from trade"
            );
            dropped.push(request.item_id);
            continue;
        }
        let mut clamped = request.clone();
        clamped.quantity = quantity;
        filtered.push(clamped);
    }
    (filtered, dropped)
}

/// Sum the priced cost of the filtered item list.
fn sum_prices(items: &[ItemRequest], modifier: u32) -> Result<Decimal, CoinError> {
    let mut total = Decimal::ZERO;
    for item in items {
        let price = pricing::price_in_gold(item.unit_price_gold, modifier, item.quantity)?;
        total = total
            .checked_add(price)
            .ok_or_else(|| CoinError::ArithmeticOverflow {
                context: String::from("batch price accumulation"),
            })?;
    }
    Ok(total)
}

/// Mirror the collaborator's confirmed relocation onto the in-memory
/// stock snapshots.
fn apply_stock_changes(
    source: &mut TraderState,
    destination: &mut TraderState,
    moved: &[ItemRequest],
) -> Result<(), TradeError> {
    for item in moved {
        let held = source.stock.get(&item.item_id).copied().unwrap_or(0);
        let remaining = held.saturating_sub(item.quantity);
        if remaining == 0 {
            source.stock.remove(&item.item_id);
        } else {
            source.stock.insert(item.item_id, remaining);
        }

        let current = destination.stock.get(&item.item_id).copied().unwrap_or(0);
        let gained =
            current
                .checked_add(item.quantity)
                .ok_or_else(|| CoinError::ArithmeticOverflow {
                    context: String::from("destination stock accumulation"),
                })?;
        destination.stock.insert(item.item_id, gained);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use coinward_types::{ActorId, ItemId, PriceModifiers, Purse};

    use crate::ports::{PortError, SilentReporter};

    use super::*;

    /// Mover that relocates exactly what it is asked to.
    struct EchoMover {
        calls: Vec<(ActorId, ActorId, Vec<ItemRequest>)>,
    }

    impl EchoMover {
        const fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl ItemMover for EchoMover {
        async fn move_items(
            &mut self,
            source: ActorId,
            destination: ActorId,
            items: &[ItemRequest],
        ) -> Result<Vec<ItemRequest>, PortError> {
            self.calls.push((source, destination, items.to_vec()));
            Ok(items.to_vec())
        }
    }

    fn party(name: &str, purse: Purse, stock: &[(ItemId, u32)]) -> TraderState {
        TraderState {
            actor_id: ActorId::new(),
            name: name.to_owned(),
            purse,
            stock: stock.iter().copied().collect::<BTreeMap<_, _>>(),
            modifiers: None,
        }
    }

    fn request(item_id: ItemId, price_gold: u32, quantity: u32) -> ItemRequest {
        ItemRequest {
            item_id,
            name: String::from("lantern"),
            unit_price_gold: Decimal::from(price_gold),
            quantity,
        }
    }

    #[tokio::test]
    async fn buy_moves_funds_then_items() {
        let lantern = ItemId::new();
        let mut player = party("Vex", Purse { gp: 5, ..Purse::EMPTY }, &[]);
        let mut merchant = party("Keyleth", Purse::EMPTY, &[(lantern, 1)]);
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let batch: TradeBatch = [(TradeKind::Buy, vec![request(lantern, 3, 1)])]
            .into_iter()
            .collect();
        let receipts = settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        assert_eq!(receipts.len(), 1);
        assert!(receipts.first().unwrap().settled);
        assert_eq!(player.purse.gp, 2);
        assert_eq!(merchant.purse.gp, 3);
        assert_eq!(player.stock.get(&lantern).copied(), Some(1));
        assert!(!merchant.stock.contains_key(&lantern));
        assert_eq!(mover.calls.len(), 1);
    }

    #[tokio::test]
    async fn empty_kinds_are_skipped() {
        let lantern = ItemId::new();
        let mut player = party("Vex", Purse::EMPTY, &[(lantern, 1)]);
        let mut merchant = party("Keyleth", Purse { gp: 10, ..Purse::EMPTY }, &[]);
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let batch: TradeBatch = [
            (TradeKind::Buy, Vec::new()),
            (TradeKind::Sell, vec![request(lantern, 2, 1)]),
        ]
        .into_iter()
        .collect();
        let receipts = settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        // Only the sell entry produced a receipt and a relocation.
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts.first().unwrap().kind, TradeKind::Sell);
        assert_eq!(mover.calls.len(), 1);
        assert_eq!(player.purse.gp, 2);
        assert_eq!(merchant.purse.gp, 8);
    }

    #[tokio::test]
    async fn rejected_kind_moves_nothing_and_later_kinds_proceed() {
        let gem = ItemId::new();
        let scrap = ItemId::new();
        let mut player = party("Vex", Purse::EMPTY, &[]);
        let mut merchant = party(
            "Keyleth",
            Purse::EMPTY,
            &[(gem, 1), (scrap, 3)],
        );
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        // Buy is unaffordable; loot is free and must still proceed.
        let batch: TradeBatch = [
            (TradeKind::Buy, vec![request(gem, 100, 1)]),
            (TradeKind::Loot, vec![request(scrap, 0, 3)]),
        ]
        .into_iter()
        .collect();
        let receipts = settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        let buy = receipts.iter().find(|r| r.kind == TradeKind::Buy).unwrap();
        assert!(!buy.settled);
        assert!(buy.moved.is_empty());
        assert_eq!(merchant.stock.get(&gem).copied(), Some(1));

        let loot = receipts.iter().find(|r| r.kind == TradeKind::Loot).unwrap();
        assert!(loot.settled);
        assert_eq!(player.stock.get(&scrap).copied(), Some(3));
        // Only the loot entry reached the mover.
        assert_eq!(mover.calls.len(), 1);
    }

    #[tokio::test]
    async fn requests_are_clamped_and_missing_items_dropped() {
        let rope = ItemId::new();
        let ghost = ItemId::new();
        let mut player = party("Vex", Purse { gp: 50, ..Purse::EMPTY }, &[]);
        let mut merchant = party("Keyleth", Purse::EMPTY, &[(rope, 2)]);
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let batch: TradeBatch = [(
            TradeKind::Buy,
            vec![request(rope, 1, 5), request(ghost, 7, 1)],
        )]
        .into_iter()
        .collect();
        let receipts = settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        let receipt = receipts.first().unwrap();
        assert_eq!(receipt.dropped, vec![ghost]);
        assert_eq!(receipt.moved.len(), 1);
        assert_eq!(receipt.moved.first().unwrap().quantity, 2);
        // 2 rope at 1 gp each; the ghost item contributed nothing.
        assert_eq!(receipt.total_gold, Decimal::from(2_u32));
        assert_eq!(player.purse.gp, 48);
    }

    #[tokio::test]
    async fn sell_uses_merchant_buy_percent() {
        let pelt = ItemId::new();
        let mut player = party("Vex", Purse::EMPTY, &[(pelt, 1)]);
        let mut merchant = party("Keyleth", Purse { gp: 100, ..Purse::EMPTY }, &[]);
        merchant.modifiers = Some(PriceModifiers { buy: 50, sell: 150 });
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let batch: TradeBatch = [(TradeKind::Sell, vec![request(pelt, 10, 1)])]
            .into_iter()
            .collect();
        settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        // Merchant buys low: 10 gp at 50% = 5 gp paid to the player.
        assert_eq!(player.purse.gp, 5);
        assert_eq!(merchant.purse.gp, 95);
    }

    #[tokio::test]
    async fn give_moves_items_without_funds() {
        let ration = ItemId::new();
        let mut player = party("Vex", Purse { gp: 1, ..Purse::EMPTY }, &[(ration, 4)]);
        let mut merchant = party("Keyleth", Purse::EMPTY, &[]);
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let batch: TradeBatch = [(TradeKind::Give, vec![request(ration, 5, 4)])]
            .into_iter()
            .collect();
        let receipts = settle_batch(
            &mut player,
            &mut merchant,
            &batch,
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(receipts.first().unwrap().settled);
        assert_eq!(player.purse.gp, 1);
        assert_eq!(merchant.purse.gp, 0);
        assert_eq!(merchant.stock.get(&ration).copied(), Some(4));
    }

    #[tokio::test]
    async fn single_purchase_clamps_to_stock() {
        let arrow = ItemId::new();
        let mut buyer = party("Vex", Purse { gp: 10, ..Purse::EMPTY }, &[]);
        let mut seller = party("Keyleth", Purse::EMPTY, &[(arrow, 3)]);
        let mut mover = EchoMover::new();
        let mut reporter = SilentReporter::new();

        let receipt = settle_single(
            &mut buyer,
            &mut seller,
            &request(arrow, 1, 10),
            &TableConfig::default(),
            &mut mover,
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(receipt.settled);
        assert_eq!(receipt.moved.first().unwrap().quantity, 3);
        assert_eq!(buyer.purse.gp, 7);
        assert_eq!(buyer.stock.get(&arrow).copied(), Some(3));
    }
}
