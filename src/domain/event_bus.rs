//! Broadcast channel for domain events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every
//! committed mutation publishes an [`AuctionEvent`] through the bus, and
//! every WebSocket connection subscribes on upgrade. Delivery is
//! fire-and-forget: publishing never blocks the mutation path, and a
//! lagging receiver drops the oldest events rather than slowing anyone
//! down.

use tokio::sync::broadcast;

use super::AuctionEvent;

/// Broadcast bus for [`AuctionEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AuctionEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event. If there
    /// are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: AuctionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    ///
    /// Each WebSocket connection calls this once on connect.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuctionEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AuctionItem, ItemId};

    fn make_event() -> AuctionEvent {
        AuctionEvent::BidAccepted {
            item: AuctionItem::new(
                ItemId::new(),
                "Lot",
                "desc",
                "https://picsum.photos/seed/lot/400",
                100,
                1_000,
            ),
            bidder_id: "user-1".to_string(),
            bidder_name: "Alice".to_string(),
            timestamp_ms: 42,
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        let count = bus.publish(make_event());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let event = make_event();
        let id = event.item_id();
        bus.publish(event);

        let received = rx.recv().await;
        let Ok(received) = received else {
            panic!("expected to receive event");
        };
        assert_eq!(received.item_id(), id);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let count = bus.publish(make_event());
        assert_eq!(count, 2);

        let e1 = rx1.recv().await;
        let e2 = rx2.recv().await;
        let Ok(e1) = e1 else {
            panic!("rx1 failed");
        };
        let Ok(e2) = e2 else {
            panic!("rx2 failed");
        };
        assert_eq!(e1.item_id(), e2.item_id());
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.receiver_count(), 0);

        let _rx1 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);

        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(_rx1);
        assert_eq!(bus.receiver_count(), 1);
    }
}
