//! # gavel-gateway
//!
//! REST API and WebSocket gateway for a live auction bidding engine.
//!
//! Many concurrent bidders race to raise the price on time-boxed items.
//! This server is the single source of truth for price, winner, and time
//! remaining: every deadline decision reads the authoritative clock,
//! every bid is arbitrated under per-item exclusive access, and every
//! committed change is broadcast so all observers stay consistent.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Connections (ws/)
//!     │
//!     ├── AuctionService + Sweeper (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AuctionRegistry (domain/)
//!     └── Clock (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
