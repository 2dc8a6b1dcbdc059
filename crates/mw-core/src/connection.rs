use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::location::LocationId;

/// An edge between two locations.
///
/// Each endpoint sees the connection as an exit in its own direction:
/// `from_dir` at `from_id`, `to_dir` at `to_id`. The two directions need not
/// be opposites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Location the connection was drawn from.
    pub from_id: LocationId,
    /// Location the connection was drawn to.
    pub to_id: LocationId,
    /// Exit direction as seen from `from_id`.
    pub from_dir: Direction,
    /// Exit direction as seen from `to_id`.
    pub to_dir: Direction,
    /// Whether the passage needs a key.
    pub locked: bool,
    /// Item id of the key; always set when `locked`.
    pub key_id: Option<String>,
}

impl Connection {
    /// Create an unlocked connection.
    pub fn new(
        from_id: impl Into<LocationId>,
        to_id: impl Into<LocationId>,
        from_dir: Direction,
        to_dir: Direction,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            from_dir,
            to_dir,
            locked: false,
            key_id: None,
        }
    }

    /// Whether `id` is one of the endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.from_id == id || self.to_id == id
    }

    /// Whether this connection joins `a` and `b`, in either order.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }

    /// The direction this connection occupies at `id`, if `id` is an endpoint.
    pub fn direction_at(&self, id: &str) -> Option<Direction> {
        if self.from_id == id {
            Some(self.from_dir)
        } else if self.to_id == id {
            Some(self.to_dir)
        } else {
            None
        }
    }

    /// The endpoint opposite `id`.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from_id == id {
            Some(&self.to_id)
        } else if self.to_id == id {
            Some(&self.from_id)
        } else {
            None
        }
    }
}

/// A partial update to an existing connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionPatch {
    /// New direction at the `from` end.
    pub from_dir: Option<Direction>,
    /// New direction at the `to` end.
    pub to_dir: Option<Direction>,
    /// New lock state.
    pub locked: Option<bool>,
    /// New key item; `Some(None)` removes it.
    #[serde(with = "crate::location::double_option")]
    pub key_id: Option<Option<String>>,
}

impl ConnectionPatch {
    /// Patch that locks the connection behind `key_id`.
    pub fn lock(key_id: impl Into<String>) -> Self {
        Self {
            locked: Some(true),
            key_id: Some(Some(key_id.into())),
            ..Self::default()
        }
    }

    /// Patch that unlocks the connection and drops its key.
    pub fn unlock() -> Self {
        Self {
            locked: Some(false),
            key_id: Some(None),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_at_each_end() {
        let conn = Connection::new("hall", "cellar", Direction::Down, Direction::Up);
        assert_eq!(conn.direction_at("hall"), Some(Direction::Down));
        assert_eq!(conn.direction_at("cellar"), Some(Direction::Up));
        assert_eq!(conn.direction_at("attic"), None);
        assert_eq!(conn.other_end("cellar"), Some("hall"));
    }

    #[test]
    fn joins_is_unordered() {
        let conn = Connection::new("a", "b", Direction::East, Direction::West);
        assert!(conn.joins("a", "b"));
        assert!(conn.joins("b", "a"));
        assert!(!conn.joins("a", "c"));
    }
}
