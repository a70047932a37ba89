//! WebSocket layer: connection handling and frame types.
//!
//! The WebSocket endpoint at `/ws` carries the live bidding protocol:
//! a snapshot on connect, bid attempts inbound, and broadcast updates
//! outbound.

pub mod connection;
pub mod handler;
pub mod messages;
