//! Data Transfer Objects for REST request/response serialization.
//!
//! All responses carry `serverTime` (epoch milliseconds from the
//! authoritative clock) so clients can compute their display offset on
//! any pull.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AuctionItem;

/// Response body for `GET /items`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemsResponse {
    /// Every live item, ordered by ascending end time.
    pub items: Vec<AuctionItem>,
    /// Authoritative server time, epoch milliseconds.
    pub server_time: i64,
}

/// Response body for `GET /items/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// The requested item.
    pub item: AuctionItem,
    /// Authoritative server time, epoch milliseconds.
    pub server_time: i64,
}

/// Response body for `GET /time`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    /// Authoritative server time, epoch milliseconds.
    pub timestamp: i64,
    /// The same instant as an RFC 3339 string.
    pub server_time: String,
}

/// Response body for `POST /reset`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    /// Always `true`; reset cannot partially fail.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn items_response_serializes_camel_case() {
        let response = ItemsResponse {
            items: vec![],
            server_time: 42,
        };
        let json = serde_json::to_string(&response).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"items":[],"serverTime":42}"#);
    }

    #[test]
    fn time_response_shape() {
        let response = TimeResponse {
            timestamp: 0,
            server_time: "1970-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string(&response).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"timestamp\":0"));
        assert!(json.contains("\"serverTime\":\"1970-01-01"));
    }
}
