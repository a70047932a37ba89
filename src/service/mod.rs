//! Service layer: business logic orchestration.
//!
//! [`AuctionService`] arbitrates bid attempts and manages the catalog
//! lifecycle, emitting events through the
//! [`crate::domain::EventBus`]. [`Sweeper`] drives the periodic
//! expiry scan.

pub mod auction_service;
pub mod sweeper;

pub use auction_service::AuctionService;
pub use sweeper::Sweeper;
