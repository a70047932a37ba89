//! Periodic lifecycle sweeper.
//!
//! [`Sweeper`] drives [`crate::service::AuctionService::sweep_expired`]
//! on a fixed cadence from a spawned task. After any cycle that
//! regenerated at least one item it broadcasts the full catalog snapshot,
//! so every observer resynchronizes in one message; quiet cycles
//! broadcast nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;

use super::AuctionService;

/// Fixed-cadence scan loop over the auction registry.
#[derive(Debug)]
pub struct Sweeper {
    service: Arc<AuctionService>,
    period: Duration,
}

impl Sweeper {
    /// Creates a sweeper ticking every `period`.
    #[must_use]
    pub fn new(service: Arc<AuctionService>, period: Duration) -> Self {
        Self { service, period }
    }

    /// Runs a single sweep cycle, returning how many items were
    /// regenerated. Broadcasts the full snapshot only when that count is
    /// non-zero.
    pub async fn run_once(&self) -> usize {
        let regenerated = self.service.sweep_expired().await;
        if regenerated.is_empty() {
            return 0;
        }

        let receivers = self.service.publish_snapshot().await;
        tracing::info!(
            count = regenerated.len(),
            receivers,
            "broadcasting restarted auctions"
        );
        regenerated.len()
    }

    /// Spawns the sweep loop on the runtime. The loop runs until the
    /// returned handle is aborted or the runtime shuts down; no cycle
    /// can take the loop down.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.period);
            loop {
                ticker.tick().await;
                let _ = self.run_once().await;
            }
        })
    }
}
