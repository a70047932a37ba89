//! WebSocket frame types.
//!
//! Frames are JSON objects tagged by `type`, with camelCase payload
//! fields. The outbound set is closed: a full snapshot
//! ([`ServerMessage::InitItems`]), a committed bid
//! ([`ServerMessage::UpdateBid`]), and a per-client rejection
//! ([`ServerMessage::Outbid`]).

use serde::{Deserialize, Serialize};

use crate::domain::{AuctionEvent, AuctionItem};

/// Frames a client can send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// A bid attempt on one item.
    #[serde(rename = "BID_PLACED", rename_all = "camelCase")]
    BidPlaced {
        /// Target item id, canonical UUID string.
        item_id: String,
        /// Offered amount in whole currency units.
        amount: u64,
        /// Identifier of the bidder.
        user_id: String,
        /// Display name of the bidder.
        user_name: String,
    },
}

/// Frames the server sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Full catalog snapshot; sent on connect and after any sweep cycle
    /// that restarted at least one auction. Broadcast to everyone.
    #[serde(rename = "INIT_ITEMS", rename_all = "camelCase")]
    InitItems {
        /// Every live item.
        items: Vec<AuctionItem>,
        /// Authoritative server time, epoch milliseconds.
        server_time: i64,
    },

    /// A committed bid. Broadcast to everyone, including the bidder.
    #[serde(rename = "UPDATE_BID", rename_all = "camelCase")]
    UpdateBid {
        /// Post-commit item snapshot.
        item: AuctionItem,
        /// Identifier of the accepted bidder.
        bidder_id: String,
        /// Display name of the accepted bidder.
        bidder_name: String,
        /// Authoritative server time, epoch milliseconds.
        server_time: i64,
    },

    /// A rejected bid. Sent only to the attempting client.
    #[serde(rename = "OUTBID", rename_all = "camelCase")]
    Outbid {
        /// The item id the attempt referenced, echoed back verbatim.
        item_id: String,
        /// Fixed rejection string, see
        /// [`crate::domain::RejectReason::wire_str`].
        error: String,
        /// The standing bid at decision time, when the item exists.
        #[serde(skip_serializing_if = "Option::is_none")]
        current_bid: Option<u64>,
        /// Authoritative server time, epoch milliseconds.
        server_time: i64,
    },
}

impl From<AuctionEvent> for ServerMessage {
    fn from(event: AuctionEvent) -> Self {
        match event {
            AuctionEvent::BidAccepted {
                item,
                bidder_id,
                bidder_name,
                timestamp_ms,
            } => Self::UpdateBid {
                item,
                bidder_id,
                bidder_name,
                server_time: timestamp_ms,
            },
            AuctionEvent::CatalogRefreshed {
                items,
                timestamp_ms,
            } => Self::InitItems {
                items,
                server_time: timestamp_ms,
            },
        }
    }
}
