//! Item and character records.
//!
//! The graph keeps one registry per kind, keyed by id. Locations only hold
//! ids; the registry owns the record, so one item or character may be
//! referenced from many places. Records are serialized verbatim into the
//! engine document, hence the engine's field names.

use serde::{Deserialize, Serialize};

/// Turn a raw id typed by the author into registry form.
///
/// Lowercases and joins the whitespace-separated words with `_`. Returns
/// `None` when nothing is left.
pub fn normalize_reference_id(raw: &str) -> Option<String> {
    let id = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    (!id.is_empty()).then_some(id)
}

/// Display name derived from an id: `rusty_sword` becomes `Rusty Sword`.
pub fn display_name_from_id(id: &str) -> String {
    let spaced = id.replace('_', " ");
    let mut name = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                name.extend(ch.to_uppercase());
            } else {
                name.push(ch);
            }
            at_word_start = false;
        } else {
            name.push(ch);
            at_word_start = true;
        }
    }
    name
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Broad item category understood by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    /// Wieldable.
    Weapon,
    /// Wearable.
    Armor,
    /// Used up on use.
    Consumable,
    /// Opens locked exits.
    Key,
    /// Readable.
    Scroll,
    /// Needed by a quest.
    Quest,
    /// Anything else.
    #[default]
    Miscellaneous,
}

/// Stat changes granted by equipping or using an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    /// Attack bonus.
    pub attack: i32,
    /// Defense bonus.
    pub defense: i32,
    /// Health bonus.
    pub health: i32,
}

/// An item record in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Registry id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description shown on examine.
    pub description: String,
    /// Category.
    pub item_type: ItemType,
    /// Stat changes, if any.
    pub modifier: Option<StatModifier>,
    /// Whether the player can use it.
    pub usable: bool,
    /// Whether using it consumes it.
    pub consumable: bool,
    /// Which lock this item opens, for keys.
    pub key_id: Option<String>,
    /// Optional flavour text.
    pub lore: Option<String>,
}

impl Item {
    /// The record synthesized when a location references an unknown item id.
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: display_name_from_id(&id),
            id,
            description: "An item.".to_string(),
            item_type: ItemType::Miscellaneous,
            modifier: None,
            usable: false,
            consumable: false,
            key_id: None,
            lore: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// Where a character's conversation with the player stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogueState {
    /// Not yet met.
    #[default]
    Greeting,
    /// Met before.
    Familiar,
    /// Quest on offer.
    QuestOffered,
    /// Quest accepted.
    QuestActive,
    /// Quest finished.
    QuestComplete,
    /// Will not talk.
    Hostile,
    /// Gone.
    Dead,
}

/// A character record in the registry (the engine calls these NPCs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Registry id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description shown on examine.
    pub description: String,
    /// Hint for the narrator's voice.
    pub personality_seed: String,
    /// Conversation progress.
    pub dialogue_state: DialogueState,
    /// Whether the character attacks on sight.
    pub hostile: bool,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack stat.
    pub attack: i32,
    /// Defense stat.
    pub defense: i32,
    /// Item ids carried.
    pub items: Vec<String>,
    /// Quest this character hands out.
    pub quest_giver: Option<String>,
    /// Extra examine text.
    pub examine_text: Option<String>,
    /// Standing with the player.
    pub relationship: i32,
    /// Remembered interactions.
    pub memory: Vec<String>,
}

impl Character {
    /// The record synthesized when a location references an unknown character id.
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: display_name_from_id(&id),
            id,
            description: "A character.".to_string(),
            personality_seed: "neutral".to_string(),
            dialogue_state: DialogueState::Greeting,
            hostile: false,
            health: 50,
            max_health: 50,
            attack: 5,
            defense: 3,
            items: Vec::new(),
            quest_giver: None,
            examine_text: None,
            relationship: 0,
            memory: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name_from_id("rusty_sword"), "Rusty Sword");
        assert_eq!(display_name_from_id("old_wizard_2"), "Old Wizard 2");
        assert_eq!(display_name_from_id("key"), "Key");
    }

    #[test]
    fn normalize_reference_ids() {
        assert_eq!(normalize_reference_id("  Rusty   Sword "), Some("rusty_sword".into()));
        assert_eq!(normalize_reference_id("lantern"), Some("lantern".into()));
        assert_eq!(normalize_reference_id("   "), None);
    }

    #[test]
    fn item_placeholder_matches_template() {
        let item = Item::placeholder("rusty_sword");
        assert_eq!(item.name, "Rusty Sword");
        assert_eq!(item.description, "An item.");
        assert_eq!(item.item_type, ItemType::Miscellaneous);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemType"], "miscellaneous");
        assert!(json["keyId"].is_null());
        assert!(json["lore"].is_null());
    }

    #[test]
    fn character_placeholder_matches_template() {
        let npc = Character::placeholder("old_wizard");
        assert_eq!(npc.name, "Old Wizard");
        let json = serde_json::to_value(&npc).unwrap();
        assert_eq!(json["personalitySeed"], "neutral");
        assert_eq!(json["dialogueState"], "greeting");
        assert_eq!(json["maxHealth"], 50);
        assert_eq!(json["attack"], 5);
        assert_eq!(json["defense"], 3);
        assert_eq!(json["relationship"], 0);
        assert!(json["examineText"].is_null());
        assert!(json["memory"].as_array().unwrap().is_empty());
    }
}
