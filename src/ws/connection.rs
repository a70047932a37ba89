//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection: sends
//! the catalog snapshot on connect, dispatches incoming bid attempts to
//! the arbiter, forwards every bus event, and writes rejections back to
//! this connection only.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ClientMessage, ServerMessage};
use crate::domain::{AuctionEvent, BidAttempt, BidOutcome, ItemId, RejectReason};
use crate::service::AuctionService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Sends `INIT_ITEMS` with the current snapshot immediately on connect.
/// - Reads bid attempts from the client and dispatches them.
/// - Forwards every event from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<AuctionEvent>,
    service: Arc<AuctionService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let hello = ServerMessage::InitItems {
        items: service.snapshot().await,
        server_time: service.server_time(),
    };
    if send_frame(&mut ws_tx, &hello).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_text_frame(&text, &service).await
                            && send_frame(&mut ws_tx, &reply).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            // Event from the bus
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        let frame = ServerMessage::from(event);
                        if send_frame(&mut ws_tx, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles one text frame from the client, returning the reply to send on
/// this connection only, if any. Accepted bids produce no direct reply;
/// their `UPDATE_BID` arrives through the bus like everyone else's.
async fn handle_text_frame(text: &str, service: &AuctionService) -> Option<ServerMessage> {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed ws frame");
            return None;
        }
    };

    match msg {
        ClientMessage::BidPlaced {
            item_id,
            amount,
            user_id,
            user_name,
        } => {
            tracing::debug!(item_id = %item_id, amount, bidder = %user_name, "bid received");

            let Ok(id) = ItemId::parse(&item_id) else {
                return Some(ServerMessage::Outbid {
                    item_id,
                    error: RejectReason::ItemNotFound.wire_str().to_string(),
                    current_bid: None,
                    server_time: service.server_time(),
                });
            };

            let outcome = service
                .place_bid(BidAttempt {
                    item_id: id,
                    amount,
                    bidder_id: user_id,
                    bidder_name: user_name,
                })
                .await;

            match outcome {
                BidOutcome::Accepted(_) => None,
                BidOutcome::Rejected(rejection) => Some(ServerMessage::Outbid {
                    item_id,
                    error: rejection.reason.wire_str().to_string(),
                    current_bid: rejection.current_bid,
                    server_time: service.server_time(),
                }),
            }
        }
    }
}

/// Serializes and sends one frame on this connection's sink.
async fn send_frame(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    frame: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(frame).unwrap_or_default();
    ws_tx.send(Message::text(json)).await
}
