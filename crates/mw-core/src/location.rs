use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a location: a slug such as `room_1` or `great_hall`.
pub type LocationId = String;

/// Description given to freshly placed locations.
pub const DEFAULT_DESCRIPTION: &str = "A new room.";

/// Derive an id from a display name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `_`, and trims leading/trailing underscores.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('_');
            in_gap = true;
        }
    }
    slug.trim_matches('_').to_string()
}

/// A point on the editing canvas. Location positions are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Position {
    /// Create a position (not clamped).
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates to be non-negative.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }

    /// Component-wise difference `self - other`.
    pub fn minus(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// The on-canvas size of a location box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl Extent {
    /// Create an extent.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half the extent, as an offset from a box's origin to its centre.
    pub fn half(self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(120.0, 60.0)
    }
}

/// Ambience tag carried into the engine document as `ambientMood`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    /// Calm, safe places.
    #[default]
    Peaceful,
    /// Something is about to happen.
    Tense,
    /// Unexplained, curious.
    Mysterious,
    /// Unlit or grim.
    Dark,
    /// Holy ground.
    Sacred,
    /// Actively hostile.
    Dangerous,
}

impl Mood {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Peaceful => "peaceful",
            Self::Tense => "tense",
            Self::Mysterious => "mysterious",
            Self::Dark => "dark",
            Self::Sacred => "sacred",
            Self::Dangerous => "dangerous",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A visitable place: one node of the map graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique slug identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Prose shown to the player on entry.
    pub description: String,
    /// Top-left corner of the location's box on the canvas.
    pub position: Position,
    /// Ambience tag.
    pub mood: Mood,
    /// Ids of items placed here (owned by the item registry).
    pub item_ids: Vec<String>,
    /// Ids of characters placed here (owned by the character registry).
    pub character_ids: Vec<String>,
    /// Extra text revealed by examining the location.
    pub examine_details: Option<String>,
}

impl Location {
    /// Create a location named `name` at `position`, with its id derived by [`slugify`].
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            description: DEFAULT_DESCRIPTION.to_string(),
            position: position.clamped(),
            mood: Mood::default(),
            item_ids: Vec::new(),
            character_ids: Vec::new(),
            examine_details: None,
        }
    }

    /// Whether `point` falls inside this location's box.
    pub fn contains(&self, point: Position, extent: Extent) -> bool {
        point.x >= self.position.x
            && point.x < self.position.x + extent.width
            && point.y >= self.position.y
            && point.y < self.position.y + extent.height
    }
}

/// A partial update to a location. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPatch {
    /// New id; differing from the current id renames the location.
    pub id: Option<LocationId>,
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New position (clamped on apply).
    pub position: Option<Position>,
    /// New mood.
    pub mood: Option<Mood>,
    /// New examine details; `Some(None)` clears them.
    #[serde(with = "double_option")]
    pub examine_details: Option<Option<String>>,
}

impl LocationPatch {
    /// Patch that only renames.
    pub fn rename(id: impl Into<LocationId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Distinguishes an absent field from an explicit `null`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Room 1"), "room_1");
        assert_eq!(slugify("  The Great -- Hall!  "), "the_great_hall");
        assert_eq!(slugify("Wizard's Tower"), "wizard_s_tower");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn new_location_is_clamped_and_peaceful() {
        let loc = Location::new("Room 3", Position::new(-5.0, 12.0));
        assert_eq!(loc.id, "room_3");
        assert_eq!(loc.position, Position::new(0.0, 12.0));
        assert_eq!(loc.mood, Mood::Peaceful);
        assert_eq!(loc.description, "A new room.");
        assert!(loc.examine_details.is_none());
    }

    #[test]
    fn contains_uses_half_open_box() {
        let loc = Location::new("Room 1", Position::new(10.0, 10.0));
        let extent = Extent::default();
        assert!(loc.contains(Position::new(10.0, 10.0), extent));
        assert!(loc.contains(Position::new(129.0, 69.0), extent));
        assert!(!loc.contains(Position::new(130.0, 20.0), extent));
        assert!(!loc.contains(Position::new(9.0, 20.0), extent));
    }

    #[test]
    fn patch_distinguishes_clear_from_absent() {
        let absent: LocationPatch = serde_json::from_str(r#"{"name":"Hall"}"#).unwrap();
        assert_eq!(absent.examine_details, None);
        let cleared: LocationPatch = serde_json::from_str(r#"{"examineDetails":null}"#).unwrap();
        assert_eq!(cleared.examine_details, Some(None));
    }
}
