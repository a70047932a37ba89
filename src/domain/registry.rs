//! Concurrent auction item storage with per-item fine-grained locking.
//!
//! [`AuctionRegistry`] stores all live items in a `HashMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. Reads on
//! the same item may run concurrently; writes on different items may run
//! concurrently; writes on the same item are serialized, so a sweep and a
//! bid on one item can never interleave.
//!
//! Mutation happens only through the closure-based methods
//! ([`AuctionRegistry::with_item_mut`], [`AuctionRegistry::for_each_mut`]);
//! no caller ever obtains a raw reference it could mutate outside the
//! lock. Lock order is always the outer map before an item entry, never
//! the reverse.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{AuctionItem, ItemId};
use crate::error::AuctionError;

/// Central store for all live auction items.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<AuctionItem>>` for fine-grained per-item locking.
#[derive(Debug, Default)]
pub struct AuctionRegistry {
    items: RwLock<HashMap<ItemId, Arc<RwLock<AuctionItem>>>>,
}

impl AuctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new item into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::InvalidRequest`] if an item with the same
    /// ID already exists (should never happen with UUID v4).
    pub async fn insert(&self, item: AuctionItem) -> Result<ItemId, AuctionError> {
        let id = item.id;
        let mut map = self.items.write().await;
        if map.contains_key(&id) {
            return Err(AuctionError::InvalidRequest(format!(
                "item {id} already exists"
            )));
        }
        map.insert(id, Arc::new(RwLock::new(item)));
        Ok(id)
    }

    /// Replaces the whole catalog in one step. Used by seeding and
    /// administrative reset.
    pub async fn replace_all(&self, items: Vec<AuctionItem>) {
        let mut map = self.items.write().await;
        map.clear();
        for item in items {
            map.insert(item.id, Arc::new(RwLock::new(item)));
        }
    }

    /// Returns a cloned snapshot of a single item, or `None` when the id
    /// is unknown.
    pub async fn get(&self, id: ItemId) -> Option<AuctionItem> {
        let map = self.items.read().await;
        match map.get(&id) {
            Some(entry) => Some(entry.read().await.clone()),
            None => None,
        }
    }

    /// Runs `f` with sole mutation rights to the item identified by `id`,
    /// returning `f`'s result, or `None` when the id is unknown.
    ///
    /// This is the only sanctioned single-item mutation path. The item's
    /// write lock is held exactly for the duration of `f`; `f` must not
    /// block.
    pub async fn with_item_mut<R>(
        &self,
        id: ItemId,
        f: impl FnOnce(&mut AuctionItem) -> R,
    ) -> Option<R> {
        let map = self.items.read().await;
        let entry = map.get(&id)?;
        let mut item = entry.write().await;
        Some(f(&mut item))
    }

    /// Runs `f` over every item in turn, each under its own write lock,
    /// collecting the `Some` results. The sweep path: `f` decides per
    /// item whether to mutate and what to report.
    pub async fn for_each_mut<R>(&self, mut f: impl FnMut(&mut AuctionItem) -> Option<R>) -> Vec<R> {
        let map = self.items.read().await;
        let mut collected = Vec::new();
        for entry in map.values() {
            let mut item = entry.write().await;
            if let Some(r) = f(&mut item) {
                collected.push(r);
            }
        }
        collected
    }

    /// Returns cloned snapshots of all items, ordered by ascending end
    /// time (id as tie-break) for stable presentation.
    ///
    /// Safe to call concurrently with in-flight mutations: each item is
    /// cloned under its read lock, so the result holds pre- or
    /// post-mutation states, never a torn one.
    pub async fn snapshot(&self) -> Vec<AuctionItem> {
        let map = self.items.read().await;
        let mut snapshot = Vec::with_capacity(map.len());
        for entry in map.values() {
            snapshot.push(entry.read().await.clone());
        }
        drop(map);
        snapshot.sort_unstable_by(|a, b| a.end_time.cmp(&b.end_time).then_with(|| a.id.cmp(&b.id)));
        snapshot
    }

    /// Returns the number of items in the registry.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if the registry contains no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
