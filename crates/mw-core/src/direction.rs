use std::fmt;

use serde::{Deserialize, Serialize};

/// A compass-like exit label. Each location has at most one exit per direction.
///
/// The declaration order is the canonical order used whenever a fallback
/// direction has to be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// Every direction, in canonical order.
    pub const ALL: [Direction; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    /// The direction pointing back the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Lowercase name, as used in the engine document.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_direction() -> impl Strategy<Value = Direction> {
        proptest::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn opposite_is_an_involution(d in any_direction()) {
            prop_assert_eq!(d.opposite().opposite(), d);
        }

        #[test]
        fn opposite_has_no_fixed_points(d in any_direction()) {
            prop_assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Direction::West).unwrap();
        assert_eq!(json, "\"west\"");
        let back: Direction = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(back, Direction::Up);
    }

    #[test]
    fn canonical_order() {
        let names: Vec<_> = Direction::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["north", "south", "east", "west", "up", "down"]);
    }
}
