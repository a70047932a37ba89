//! Domain events reflecting committed auction state changes.
//!
//! Every committed mutation emits an [`AuctionEvent`] through the
//! [`super::EventBus`]. Events are broadcast to every WebSocket
//! connection; rejections are not events — they go only to the attempting
//! client and never reach the bus.

use serde::Serialize;

use super::{AuctionItem, ItemId};

/// Event emitted after a committed mutation.
///
/// `timestamp_ms` is the authoritative server time at emission, read from
/// the clock provider; clients use it to keep their display offset in
/// sync.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuctionEvent {
    /// A bid was accepted and committed on one item.
    BidAccepted {
        /// Post-commit item snapshot, the canonical value to display.
        item: AuctionItem,
        /// Identifier of the accepted bidder.
        bidder_id: String,
        /// Display name of the accepted bidder.
        bidder_name: String,
        /// Server time at emission, epoch milliseconds.
        timestamp_ms: i64,
    },

    /// The catalog was regenerated (expired cycles restarted) or
    /// re-seeded; carries the full post-change snapshot.
    CatalogRefreshed {
        /// Snapshot of every item after the change.
        items: Vec<AuctionItem>,
        /// Server time at emission, epoch milliseconds.
        timestamp_ms: i64,
    },
}

impl AuctionEvent {
    /// Returns the id of the item a [`AuctionEvent::BidAccepted`] event
    /// concerns, `None` for whole-catalog events.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::BidAccepted { item, .. } => Some(item.id),
            Self::CatalogRefreshed { .. } => None,
        }
    }

    /// Returns the event kind as a static string slice, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BidAccepted { .. } => "bid_accepted",
            Self::CatalogRefreshed { .. } => "catalog_refreshed",
        }
    }
}
