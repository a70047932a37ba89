//! Auction item state and the transient bid attempt.
//!
//! [`AuctionItem`] is the unit of bidding: price, current leader, deadline,
//! and bid count. It is stored in the [`super::AuctionRegistry`] and only
//! mutated through the registry's exclusive-access path. All fields
//! serialize in camelCase, which is the wire format clients consume.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// Live state of one auction item.
///
/// `id` and the display fields are immutable for the item's lifetime.
/// The bidding fields (`current_bid`, `highest_bidder`,
/// `highest_bidder_name`, `bid_count`) change only through
/// [`AuctionItem::record_bid`], and `end_time` only through
/// [`AuctionItem::regenerate`], which starts a fresh auction cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuctionItem {
    /// Unique item identifier, stable across regeneration cycles.
    pub id: ItemId,

    /// Display title.
    pub title: String,

    /// Display description.
    pub description: String,

    /// Display image reference.
    pub image_url: String,

    /// Opening price of every auction cycle, in whole currency units.
    pub starting_price: u64,

    /// Highest accepted bid so far; equals `starting_price` until the
    /// first accepted bid. Monotonically non-decreasing within a cycle.
    pub current_bid: u64,

    /// Identifier of the current leader; `None` until the first accepted
    /// bid of the cycle.
    pub highest_bidder: Option<String>,

    /// Display name of the current leader.
    pub highest_bidder_name: Option<String>,

    /// Absolute end of the current cycle, epoch milliseconds.
    pub end_time: i64,

    /// Number of accepted bids in the current cycle.
    pub bid_count: u64,
}

impl AuctionItem {
    /// Creates an item at the start of its first auction cycle.
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        starting_price: u64,
        end_time: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
            starting_price,
            current_bid: starting_price,
            highest_bidder: None,
            highest_bidder_name: None,
            end_time,
            bid_count: 0,
        }
    }

    /// Returns `true` when `now` is strictly past the cycle deadline.
    ///
    /// A bid arriving at exactly `end_time` is still inside the cycle.
    #[must_use]
    pub const fn is_expired(&self, now: i64) -> bool {
        now > self.end_time
    }

    /// Commits an accepted bid. The caller has already validated the
    /// amount against `current_bid` and the deadline under the item's
    /// write lock.
    pub fn record_bid(&mut self, amount: u64, bidder_id: &str, bidder_name: &str) {
        self.current_bid = amount;
        self.highest_bidder = Some(bidder_id.to_string());
        self.highest_bidder_name = Some(bidder_name.to_string());
        self.bid_count = self.bid_count.saturating_add(1);
    }

    /// Starts a new auction cycle in place: price back to
    /// `starting_price`, no leader, zero bids, fresh deadline. The id and
    /// display data survive.
    pub fn regenerate(&mut self, new_end_time: i64) {
        self.current_bid = self.starting_price;
        self.highest_bidder = None;
        self.highest_bidder_name = None;
        self.bid_count = 0;
        self.end_time = new_end_time;
    }
}

/// A bid attempt as it arrives from the boundary. Consumed by the
/// arbiter, never stored.
#[derive(Debug, Clone)]
pub struct BidAttempt {
    /// Target item.
    pub item_id: ItemId,
    /// Offered amount in whole currency units.
    pub amount: u64,
    /// Identifier of the bidder.
    pub bidder_id: String,
    /// Display name of the bidder.
    pub bidder_name: String,
}
