//! The world document the narrative engine loads.
//!
//! Field names and defaults are a wire contract with the engine. The editor
//! only ever produces fresh documents, but every type here also deserializes
//! so that modules written by other tools can be checked.

use std::collections::BTreeMap;

use mw_core::{Character, Direction, Item, Mood};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inventory slots a new player starts with.
pub const DEFAULT_MAX_INVENTORY: usize = 10;
/// Starting (and maximum) player health.
pub const DEFAULT_PLAYER_HEALTH: i32 = 100;
/// Starting player attack.
pub const DEFAULT_PLAYER_ATTACK: i32 = 5;
/// Starting player defense.
pub const DEFAULT_PLAYER_DEFENSE: i32 = 3;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndingType {
    /// Won without bloodshed.
    VictoryPeace,
    /// Won by fighting.
    VictoryCombat,
    /// The player died.
    Death,
}

/// What the engine is doing when the document is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Free movement. Every exported module starts here.
    #[default]
    Exploring,
    /// Fighting the named character.
    InCombat(String),
    /// Talking to the named character.
    InDialogue(String),
    /// The game is over.
    GameOver(EndingType),
}

/// Difficulty setting stored with the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    /// Forgiving.
    Easy,
    /// Standard.
    #[default]
    Normal,
    /// Punishing.
    Hard,
}

/// The player's state at the start of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Id of the location the player stands in.
    pub location: String,
    /// Carried item ids.
    pub inventory: Vec<String>,
    /// Inventory capacity.
    pub max_inventory: usize,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack stat.
    pub attack: i32,
    /// Defense stat.
    pub defense: i32,
    /// Equipped weapon item id.
    pub equipped_weapon: Option<String>,
    /// Equipped armor item id.
    pub equipped_armor: Option<String>,
    /// Quest progress flags.
    pub quest_flags: BTreeMap<String, bool>,
    /// Ids of locations already seen.
    pub visited_locations: Vec<String>,
    /// Turn counter.
    pub turns_elapsed: u32,
    /// Active status effects.
    #[serde(default)]
    pub status_effects: Vec<Value>,
    /// Secrets found so far.
    #[serde(default)]
    pub discovered_secrets: Vec<String>,
}

impl PlayerRecord {
    /// A fresh player standing at `location`.
    ///
    /// `visited` seeds `visited_locations` with the start; pass `false` when
    /// the location is only a placeholder.
    pub fn starting_at(location: impl Into<String>, visited: bool) -> Self {
        let location = location.into();
        Self {
            visited_locations: if visited {
                vec![location.clone()]
            } else {
                Vec::new()
            },
            location,
            inventory: Vec::new(),
            max_inventory: DEFAULT_MAX_INVENTORY,
            health: DEFAULT_PLAYER_HEALTH,
            max_health: DEFAULT_PLAYER_HEALTH,
            attack: DEFAULT_PLAYER_ATTACK,
            defense: DEFAULT_PLAYER_DEFENSE,
            equipped_weapon: None,
            equipped_armor: None,
            quest_flags: BTreeMap::new(),
            turns_elapsed: 0,
            status_effects: Vec::new(),
            discovered_secrets: Vec::new(),
        }
    }
}

/// One location as the engine sees it: the graph node plus its derived exits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Location id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Entry description.
    pub description: String,
    /// Item ids present here.
    pub items: Vec<String>,
    /// Character ids present here.
    pub npcs: Vec<String>,
    /// Destination location id per direction.
    pub exits: BTreeMap<Direction, String>,
    /// Key item id per locked direction.
    pub locked_exits: BTreeMap<Direction, String>,
    /// Whether the player has been here.
    pub visited: bool,
    /// Secrets already found here.
    #[serde(default)]
    pub discovered_secrets: Vec<String>,
    /// Ambience tag.
    #[serde(default)]
    pub ambient_mood: Mood,
    /// Text revealed by examining the location.
    #[serde(default)]
    pub examine_details: Option<String>,
    /// Shorter description for return visits.
    #[serde(default)]
    pub revisit_description: Option<String>,
}

/// The complete document handed to the engine and the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldDocument {
    /// Player state.
    pub player: PlayerRecord,
    /// Locations keyed by id.
    pub locations: BTreeMap<String, LocationRecord>,
    /// Item registry.
    pub items: BTreeMap<String, Item>,
    /// Character registry.
    pub npcs: BTreeMap<String, Character>,
    /// Quest definitions (authored elsewhere).
    pub quests: BTreeMap<String, Value>,
    /// Scripted events (authored elsewhere).
    pub events: Vec<Value>,
    /// Engine mode.
    pub game_mode: GameMode,
    /// Combat in progress.
    pub combat_state: Option<Value>,
    /// Narrative message history.
    pub message_log: Vec<Value>,
    /// Combat message history.
    pub combat_log: Vec<Value>,
    /// Context carried between narrator calls.
    pub last_narrative_context: Option<Value>,
    /// Whether the engine has run its first-turn setup.
    pub initialized: bool,
    /// Difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Player journal entries.
    #[serde(default)]
    pub journal: Vec<Value>,
    /// Crafting recipes.
    #[serde(default)]
    pub recipes: Vec<Value>,
    /// Past conversations.
    #[serde(default)]
    pub dialogue_history: Vec<Value>,
    /// Commands entered so far.
    #[serde(default)]
    pub command_log: Vec<Value>,
}

impl WorldDocument {
    /// An uninitialized document for a player starting at `player`.
    pub fn new(player: PlayerRecord) -> Self {
        Self {
            player,
            locations: BTreeMap::new(),
            items: BTreeMap::new(),
            npcs: BTreeMap::new(),
            quests: BTreeMap::new(),
            events: Vec::new(),
            game_mode: GameMode::Exploring,
            combat_state: None,
            message_log: Vec::new(),
            combat_log: Vec::new(),
            last_narrative_context: None,
            initialized: false,
            difficulty: Difficulty::Normal,
            journal: Vec::new(),
            recipes: Vec::new(),
            dialogue_history: Vec::new(),
            command_log: Vec::new(),
        }
    }

    /// Compact JSON, as sent to the validator and exporter.
    pub fn to_json(&self) -> crate::DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, as written to module files.
    pub fn to_json_pretty(&self) -> crate::DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document.
    pub fn from_json(json: &str) -> crate::DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
