//! Structural checks a module must pass before the engine will load it.
//!
//! Errors make a module unusable: missing locations, a start location that
//! does not exist, exits or references pointing nowhere. Warnings flag things
//! that are legal but probably unintended.

use std::collections::{BTreeSet, VecDeque};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::WorldDocument;

/// Outcome of checking a module, as reported back to the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no errors. Warnings do not affect validity.
    pub valid: bool,
    /// Problems that stop the module from loading.
    pub errors: Vec<String>,
    /// Suspicious but loadable.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result; validity follows from `errors` being empty.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Parse and check a serialized module.
///
/// Text that does not parse as a world document is reported as a single
/// error rather than failing.
pub fn validate_document(json: &str) -> ValidationResult {
    match WorldDocument::from_json(json) {
        Ok(doc) => validate_module(&doc),
        Err(e) => ValidationResult::new(vec![format!("Invalid JSON: {e}")], Vec::new()),
    }
}

/// Check a parsed module.
pub fn validate_module(doc: &WorldDocument) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if doc.locations.is_empty() {
        errors.push("Module must have at least one location.".to_string());
    }

    let start = &doc.player.location;
    let start_exists = doc.locations.contains_key(start);
    if !start_exists {
        errors.push(format!("Starting location '{start}' does not exist."));
    }

    for (loc_id, loc) in &doc.locations {
        for (dir, dest) in &loc.exits {
            if !doc.locations.contains_key(dest) {
                errors.push(format!(
                    "Location '{loc_id}' exit {dir} points to non-existent '{dest}'."
                ));
            }
        }
        for item_id in &loc.items {
            if !doc.items.contains_key(item_id) {
                errors.push(format!(
                    "Location '{loc_id}' references non-existent item '{item_id}'."
                ));
            }
        }
        for npc_id in &loc.npcs {
            if !doc.npcs.contains_key(npc_id) {
                errors.push(format!(
                    "Location '{loc_id}' references non-existent NPC '{npc_id}'."
                ));
            }
        }
        // Keys can come from quests or events, so an unknown key is only a warning.
        for (dir, key) in &loc.locked_exits {
            if !doc.items.contains_key(key) {
                warnings.push(format!(
                    "Location '{loc_id}' exit {dir} is locked by unknown item '{key}'."
                ));
            }
        }
    }

    if start_exists {
        let reached = reachable_from(doc, start);
        for loc_id in doc.locations.keys().filter(|id| !reached.contains(id.as_str())) {
            warnings.push(format!(
                "Location '{loc_id}' is not reachable from the starting location."
            ));
        }
    }

    if doc.quests.is_empty() {
        warnings.push("Module has no quests defined.".to_string());
    }
    if doc.npcs.is_empty() {
        warnings.push("Module has no NPCs defined.".to_string());
    }

    debug!(
        "validated module: {} error(s), {} warning(s)",
        errors.len(),
        warnings.len()
    );
    ValidationResult::new(errors, warnings)
}

/// Location ids reachable from `start` by following exits, locked or not.
fn reachable_from<'a>(doc: &'a WorldDocument, start: &'a str) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        let Some(loc) = doc.locations.get(id) else {
            continue;
        };
        for dest in loc.exits.values() {
            if seen.insert(dest.as_str()) {
                queue.push_back(dest.as_str());
            }
        }
    }
    seen
}
