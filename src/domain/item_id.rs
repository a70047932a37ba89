//! Type-safe auction item identifier.
//!
//! [`ItemId`] is a newtype wrapper around [`uuid::Uuid`] (v4) providing
//! type safety so that item identifiers cannot be confused with other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an auction item.
///
/// Wraps a UUID v4. Generated when an item is first created and kept for
/// the item's whole lifetime, across regeneration cycles. Used as the
/// dictionary key in [`super::AuctionRegistry`], event discriminator, and
/// the `itemId` field on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct ItemId(uuid::Uuid);

impl ItemId {
    /// Creates a new random `ItemId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `ItemId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Parses an `ItemId` from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns a [`uuid::Error`] when the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        s.parse::<uuid::Uuid>().map(Self)
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for ItemId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ItemId> for uuid::Uuid {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_uuid_format() {
        let id = ItemId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn parse_round_trip() {
        let id = ItemId::new();
        let parsed = ItemId::parse(&id.to_string());
        let Ok(parsed) = parsed else {
            panic!("canonical form failed to parse");
        };
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ItemId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = ItemId::new();
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let deserialized: ItemId = serde_json::from_str(&json).ok().unwrap_or_else(|| {
            panic!("deserialization failed");
        });
        assert_eq!(id, deserialized);
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = ItemId::new();
        let mut map = HashMap::new();
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }
}
