//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with sensible defaults for local
//! development.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// Seconds between sweeper cycles.
    pub sweep_interval_secs: u64,

    /// Lower bound of a randomized auction cycle, in seconds.
    pub auction_min_duration_secs: u64,

    /// Upper bound of a randomized auction cycle, in seconds.
    pub auction_max_duration_secs: u64,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let sweep_interval_secs = parse_env("SWEEP_INTERVAL_SECS", 5);
        let auction_min_duration_secs = parse_env("AUCTION_MIN_DURATION_SECS", 180);
        let auction_max_duration_secs = parse_env("AUCTION_MAX_DURATION_SECS", 600);
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 1_024);

        Ok(Self {
            listen_addr,
            sweep_interval_secs,
            auction_min_duration_secs,
            auction_max_duration_secs,
            event_bus_capacity,
        })
    }

    /// Sweeper cadence as a [`Duration`].
    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Lower cycle-duration bound as a [`Duration`].
    #[must_use]
    pub const fn auction_min_duration(&self) -> Duration {
        Duration::from_secs(self.auction_min_duration_secs)
    }

    /// Upper cycle-duration bound as a [`Duration`].
    #[must_use]
    pub const fn auction_max_duration(&self) -> Duration {
        Duration::from_secs(self.auction_max_duration_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
