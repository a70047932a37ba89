//! Bid arbitration outcomes.
//!
//! [`BidOutcome`] is the arbiter's verdict on one attempt. Accepted
//! outcomes carry the committed item state, which is the canonical value
//! to broadcast. Rejections carry a [`RejectReason`] and, when the item
//! exists, the bid the attempt lost to; they are surfaced only to the
//! attempting client and leave the registry untouched.

use super::AuctionItem;

/// Verdict of the arbiter on a single bid attempt.
#[derive(Debug, Clone)]
pub enum BidOutcome {
    /// The bid was committed; the item is the post-commit snapshot.
    Accepted(AuctionItem),
    /// The bid was rejected; no state changed.
    Rejected(BidRejection),
}

impl BidOutcome {
    /// Returns `true` for accepted outcomes.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Why a bid attempt was turned away.
#[derive(Debug, Clone)]
pub struct BidRejection {
    /// Classification of the rejection.
    pub reason: RejectReason,
    /// The standing bid at decision time, when the item exists.
    pub current_bid: Option<u64>,
}

impl BidRejection {
    /// Rejection for an unknown item id.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            reason: RejectReason::ItemNotFound,
            current_bid: None,
        }
    }
}

/// Classification of a rejected bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The attempt referenced an item that does not exist (a client-side
    /// bug or a stale snapshot).
    ItemNotFound,
    /// The attempt arrived after the item's deadline.
    AuctionEnded,
    /// The amount did not strictly exceed the standing bid. Expected and
    /// frequent, not a fault.
    BidTooLow,
    /// Unanticipated failure while processing the attempt.
    Internal,
}

impl RejectReason {
    /// The fixed error string clients receive for this rejection.
    #[must_use]
    pub const fn wire_str(self) -> &'static str {
        match self {
            Self::ItemNotFound => "Item not found",
            Self::AuctionEnded => "AUCTION_ENDED",
            Self::BidTooLow => "OUTBID",
            Self::Internal => "Server error processing bid",
        }
    }
}
