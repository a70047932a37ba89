//! Auction service: bid arbitration, catalog lifecycle, and event emission.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::domain::catalog::default_catalog;
use crate::domain::{
    AuctionEvent, AuctionItem, AuctionRegistry, BidAttempt, BidOutcome, BidRejection, Clock,
    EventBus, ItemId, RejectReason,
};

/// Orchestration layer for all auction operations.
///
/// Owns references to the [`AuctionRegistry`] for state, the [`EventBus`]
/// for event emission, and the [`Clock`] for every time decision. Each
/// mutation method follows the pattern: acquire the item's lock → compare
/// and assign → release → emit events → return the result. Nothing is
/// awaited while an item lock is held.
#[derive(Debug, Clone)]
pub struct AuctionService {
    registry: Arc<AuctionRegistry>,
    event_bus: EventBus,
    clock: Arc<dyn Clock>,
    min_cycle: Duration,
    max_cycle: Duration,
}

impl AuctionService {
    /// Creates a new `AuctionService`.
    ///
    /// `min_cycle` / `max_cycle` bound the randomized duration of each
    /// auction cycle.
    #[must_use]
    pub fn new(
        registry: Arc<AuctionRegistry>,
        event_bus: EventBus,
        clock: Arc<dyn Clock>,
        min_cycle: Duration,
        max_cycle: Duration,
    ) -> Self {
        Self {
            registry,
            event_bus,
            clock,
            min_cycle,
            max_cycle,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`AuctionRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<AuctionRegistry> {
        &self.registry
    }

    /// Returns the current authoritative server time, epoch milliseconds.
    #[must_use]
    pub fn server_time(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Arbitrates one bid attempt.
    ///
    /// The whole accept/reject decision runs inside the item's exclusive
    /// section: look up the item, check the deadline against the
    /// authoritative clock, require the amount to strictly exceed the
    /// standing bid, then commit. Among concurrent attempts on one item,
    /// each observes every earlier commit before deciding, so equal
    /// amounts can never both be accepted and no update is lost.
    ///
    /// On acceptance the committed snapshot is published as
    /// [`AuctionEvent::BidAccepted`] after the lock is released.
    /// Rejections publish nothing and mutate nothing.
    pub async fn place_bid(&self, attempt: BidAttempt) -> BidOutcome {
        let verdict = self
            .registry
            .with_item_mut(attempt.item_id, |item| {
                let now = self.clock.now_millis();
                if item.is_expired(now) {
                    return Err(BidRejection {
                        reason: RejectReason::AuctionEnded,
                        current_bid: Some(item.current_bid),
                    });
                }
                if attempt.amount <= item.current_bid {
                    return Err(BidRejection {
                        reason: RejectReason::BidTooLow,
                        current_bid: Some(item.current_bid),
                    });
                }
                item.record_bid(attempt.amount, &attempt.bidder_id, &attempt.bidder_name);
                Ok(item.clone())
            })
            .await;

        match verdict {
            None => {
                tracing::debug!(item_id = %attempt.item_id, "bid on unknown item");
                BidOutcome::Rejected(BidRejection::not_found())
            }
            Some(Err(rejection)) => {
                tracing::debug!(
                    item_id = %attempt.item_id,
                    amount = attempt.amount,
                    reason = rejection.reason.wire_str(),
                    "bid rejected"
                );
                BidOutcome::Rejected(rejection)
            }
            Some(Ok(item)) => {
                let _ = self.event_bus.publish(AuctionEvent::BidAccepted {
                    item: item.clone(),
                    bidder_id: attempt.bidder_id,
                    bidder_name: attempt.bidder_name.clone(),
                    timestamp_ms: self.clock.now_millis(),
                });
                tracing::info!(
                    item_id = %item.id,
                    amount = attempt.amount,
                    bidder = %attempt.bidder_name,
                    title = %item.title,
                    "bid accepted"
                );
                BidOutcome::Accepted(item)
            }
        }
    }

    /// Regenerates every item whose cycle has ended, returning the
    /// regenerated items. Empty when nothing expired.
    ///
    /// Runs under the same per-item locks as [`AuctionService::place_bid`],
    /// so a bid at the exact expiry instant is deterministically either
    /// accepted before the item is swept or rejected as ended. It is
    /// never accepted and then silently discarded by the sweep.
    pub async fn sweep_expired(&self) -> Vec<AuctionItem> {
        let regenerated = self
            .registry
            .for_each_mut(|item| {
                let now = self.clock.now_millis();
                if item.is_expired(now) {
                    item.regenerate(self.fresh_end_time(now));
                    Some(item.clone())
                } else {
                    None
                }
            })
            .await;

        if !regenerated.is_empty() {
            tracing::info!(count = regenerated.len(), "expired auctions regenerated");
        }
        regenerated
    }

    /// Returns a cloned snapshot of every item, ordered by ascending end
    /// time.
    pub async fn snapshot(&self) -> Vec<AuctionItem> {
        self.registry.snapshot().await
    }

    /// Returns a cloned snapshot of one item, or `None` when unknown.
    pub async fn get(&self, id: ItemId) -> Option<AuctionItem> {
        self.registry.get(id).await
    }

    /// Populates the registry from the built-in catalog, each lot opening
    /// a fresh cycle with a randomized deadline. Replaces any existing
    /// items.
    pub async fn seed(&self) {
        let now = self.clock.now_millis();
        let items = default_catalog()
            .iter()
            .map(|entry| {
                AuctionItem::new(
                    ItemId::new(),
                    entry.title,
                    entry.description,
                    entry.image_url,
                    entry.starting_price,
                    self.fresh_end_time(now),
                )
            })
            .collect();
        self.registry.replace_all(items).await;
        tracing::info!(count = default_catalog().len(), "auction catalog seeded");
    }

    /// Clears and re-seeds the registry, then broadcasts the fresh
    /// snapshot so every connected observer resynchronizes. Test/ops use
    /// only.
    pub async fn reset(&self) {
        self.seed().await;
        let _ = self.publish_snapshot().await;
        tracing::info!("registry reset");
    }

    /// Publishes the current full snapshot as
    /// [`AuctionEvent::CatalogRefreshed`], returning the receiver count.
    pub async fn publish_snapshot(&self) -> usize {
        let items = self.registry.snapshot().await;
        self.event_bus.publish(AuctionEvent::CatalogRefreshed {
            items,
            timestamp_ms: self.clock.now_millis(),
        })
    }

    /// Draws a fresh cycle deadline: `now` plus a uniform random offset
    /// between the configured bounds.
    fn fresh_end_time(&self, now: i64) -> i64 {
        let min = self.min_cycle.as_millis() as i64;
        let max = (self.max_cycle.as_millis() as i64).max(min);
        now + rand::rng().random_range(min..=max)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;
    use tokio::task::JoinSet;

    fn make_service(clock: Arc<ManualClock>) -> AuctionService {
        AuctionService::new(
            Arc::new(AuctionRegistry::new()),
            EventBus::new(64),
            clock,
            Duration::from_secs(180),
            Duration::from_secs(600),
        )
    }

    async fn add_item(service: &AuctionService, starting_price: u64, end_time: i64) -> ItemId {
        let item = AuctionItem::new(
            ItemId::new(),
            "Test Lot",
            "A lot for testing",
            "https://picsum.photos/seed/lot/400",
            starting_price,
            end_time,
        );
        let id = item.id;
        let Ok(inserted) = service.registry().insert(item).await else {
            panic!("seeding test item failed");
        };
        assert_eq!(inserted, id);
        id
    }

    fn attempt(item_id: ItemId, amount: u64, bidder: &str) -> BidAttempt {
        BidAttempt {
            item_id,
            amount,
            bidder_id: format!("id-{bidder}"),
            bidder_name: bidder.to_string(),
        }
    }

    #[tokio::test]
    async fn accepted_bid_commits_and_emits_event() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 300_000).await;
        let mut rx = service.event_bus().subscribe();

        let outcome = service.place_bid(attempt(id, 5_100, "Alice")).await;
        let BidOutcome::Accepted(item) = outcome else {
            panic!("expected acceptance");
        };
        assert_eq!(item.current_bid, 5_100);
        assert_eq!(item.bid_count, 1);
        assert_eq!(item.highest_bidder_name.as_deref(), Some("Alice"));

        let event = rx.recv().await;
        let Ok(event) = event else {
            panic!("expected event");
        };
        assert_eq!(event.kind(), "bid_accepted");
        assert_eq!(event.item_id(), Some(id));
    }

    #[tokio::test]
    async fn bid_not_strictly_above_current_is_rejected() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);
        let id = add_item(&service, 5_000, 300_000).await;

        for amount in [4_999, 5_000] {
            let outcome = service.place_bid(attempt(id, amount, "Bob")).await;
            let BidOutcome::Rejected(rejection) = outcome else {
                panic!("expected rejection for {amount}");
            };
            assert_eq!(rejection.reason, RejectReason::BidTooLow);
            assert_eq!(rejection.current_bid, Some(5_000));
        }

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert_eq!(item.current_bid, 5_000);
        assert_eq!(item.bid_count, 0);
        assert!(item.highest_bidder.is_none());
    }

    #[tokio::test]
    async fn first_valid_bid_must_exceed_starting_price() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);
        let id = add_item(&service, 5_000, 300_000).await;

        assert!(!service.place_bid(attempt(id, 5_000, "Bob")).await.is_accepted());
        assert!(service.place_bid(attempt(id, 5_001, "Bob")).await.is_accepted());
    }

    #[tokio::test]
    async fn equal_amounts_accept_at_most_one() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);
        let id = add_item(&service, 5_000, 300_000).await;

        let first = service.place_bid(attempt(id, 5_100, "Alice")).await;
        let second = service.place_bid(attempt(id, 5_100, "Bob")).await;
        assert!(first.is_accepted());
        assert!(!second.is_accepted());

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert_eq!(item.bid_count, 1);
        assert_eq!(item.highest_bidder_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn unknown_item_is_rejected_not_found() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);

        let outcome = service.place_bid(attempt(ItemId::new(), 100, "Bob")).await;
        let BidOutcome::Rejected(rejection) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.reason, RejectReason::ItemNotFound);
        assert!(rejection.current_bid.is_none());
    }

    #[tokio::test]
    async fn bid_past_deadline_is_rejected_ended() {
        let clock = Arc::new(ManualClock::at(0));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 300_000).await;

        clock.set(300_001);
        let outcome = service.place_bid(attempt(id, 9_000, "Bob")).await;
        let BidOutcome::Rejected(rejection) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.reason, RejectReason::AuctionEnded);
        assert_eq!(rejection.current_bid, Some(5_000));

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert_eq!(item.current_bid, 5_000);
    }

    #[tokio::test]
    async fn bid_at_exact_deadline_is_accepted() {
        let clock = Arc::new(ManualClock::at(0));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 300_000).await;

        clock.set(300_000);
        assert!(service.place_bid(attempt(id, 5_100, "Alice")).await.is_accepted());
    }

    #[tokio::test]
    async fn rejection_publishes_no_event() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);
        let id = add_item(&service, 5_000, 300_000).await;
        let mut rx = service.event_bus().subscribe();

        let _ = service.place_bid(attempt(id, 1, "Bob")).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn raise_then_lowball_then_late_bid() {
        let clock = Arc::new(ManualClock::at(0));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 300_000).await;

        clock.set(1_000);
        assert!(service.place_bid(attempt(id, 5_100, "Alice")).await.is_accepted());

        let lowball = service.place_bid(attempt(id, 5_050, "Bob")).await;
        let BidOutcome::Rejected(rejection) = lowball else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.reason, RejectReason::BidTooLow);
        assert_eq!(rejection.current_bid, Some(5_100));

        clock.set(301_000);
        let late = service.place_bid(attempt(id, 5_200, "Cara")).await;
        let BidOutcome::Rejected(rejection) = late else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.reason, RejectReason::AuctionEnded);

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert_eq!(item.current_bid, 5_100);
        assert_eq!(item.bid_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_burst_keeps_maximum_and_counts_accepts() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = Arc::new(make_service(clock));
        let id = add_item(&service, 5_000, 300_000).await;

        let mut set = JoinSet::new();
        for offset in 0..50u64 {
            let service = Arc::clone(&service);
            set.spawn(async move {
                service
                    .place_bid(attempt(id, 5_100 + offset, "racer"))
                    .await
            });
        }

        let mut accepted = 0u64;
        while let Some(joined) = set.join_next().await {
            let Ok(outcome) = joined else {
                panic!("bidder task panicked");
            };
            if outcome.is_accepted() {
                accepted += 1;
            }
        }

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert!(accepted >= 1);
        assert_eq!(item.current_bid, 5_149);
        assert_eq!(item.bid_count, accepted);
        assert!(item.highest_bidder.is_some());
    }

    #[tokio::test]
    async fn sweep_regenerates_only_expired_items() {
        let clock = Arc::new(ManualClock::at(5_000));
        let service = make_service(Arc::clone(&clock));
        let expired = add_item(&service, 5_000, 1_000).await;
        let live = add_item(&service, 2_000, 10_000).await;

        let _ = service.place_bid(attempt(live, 2_500, "Alice")).await;

        let regenerated = service.sweep_expired().await;
        assert_eq!(regenerated.len(), 1);
        assert_eq!(regenerated.first().map(|i| i.id), Some(expired));

        let Some(fresh) = service.get(expired).await else {
            panic!("item vanished");
        };
        assert_eq!(fresh.current_bid, 5_000);
        assert_eq!(fresh.bid_count, 0);
        assert!(fresh.highest_bidder.is_none());
        assert!(fresh.end_time > 5_000);

        let Some(untouched) = service.get(live).await else {
            panic!("item vanished");
        };
        assert_eq!(untouched.current_bid, 2_500);
        assert_eq!(untouched.end_time, 10_000);
    }

    #[tokio::test]
    async fn sweep_with_nothing_expired_is_empty() {
        let clock = Arc::new(ManualClock::at(0));
        let service = make_service(clock);
        let _ = add_item(&service, 5_000, 300_000).await;

        assert!(service.sweep_expired().await.is_empty());
    }

    #[tokio::test]
    async fn regenerated_deadline_stays_within_bounds() {
        let clock = Arc::new(ManualClock::at(1_000_000));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 1).await;

        let _ = service.sweep_expired().await;
        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert!(item.end_time >= 1_000_000 + 180_000);
        assert!(item.end_time <= 1_000_000 + 600_000);
    }

    #[tokio::test]
    async fn accepted_bid_then_expiry_starts_clean_cycle() {
        let clock = Arc::new(ManualClock::at(0));
        let service = make_service(Arc::clone(&clock));
        let id = add_item(&service, 5_000, 1_000).await;

        assert!(service.place_bid(attempt(id, 6_000, "Alice")).await.is_accepted());
        clock.set(2_000);
        let regenerated = service.sweep_expired().await;
        assert_eq!(regenerated.len(), 1);

        let Some(item) = service.get(id).await else {
            panic!("item vanished");
        };
        assert_eq!(item.current_bid, 5_000);
        assert_eq!(item.bid_count, 0);
        assert!(item.highest_bidder.is_none());
    }

    #[tokio::test]
    async fn seed_populates_the_catalog() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);

        service.seed().await;
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.len(), default_catalog().len());
        assert!(snapshot.iter().all(|i| i.current_bid == i.starting_price));
        assert!(snapshot.iter().all(|i| i.end_time > 1_000));
        assert!(snapshot.iter().all(|i| i.bid_count == 0));
    }

    #[tokio::test]
    async fn reset_reseeds_and_broadcasts_snapshot() {
        let clock = Arc::new(ManualClock::at(1_000));
        let service = make_service(clock);
        service.seed().await;
        let mut rx = service.event_bus().subscribe();

        service.reset().await;

        let event = rx.recv().await;
        let Ok(AuctionEvent::CatalogRefreshed { items, .. }) = event else {
            panic!("expected catalog refresh");
        };
        assert_eq!(items.len(), default_catalog().len());
    }
}
