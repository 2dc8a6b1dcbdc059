//! Recorded editor input, for replaying a session without a screen.
//!
//! A script is a JSON array of events such as
//! `{"event": "click", "x": 148, "y": 92}` or
//! `{"event": "attachItem", "location": "room_1", "id": "rusty_sword"}`.

use mw_core::{ConnectionPatch, LocationPatch, Position};
use serde::{Deserialize, Serialize};

use crate::client::ModuleService;
use crate::controller::Outcome;
use crate::editor::Editor;
use crate::prompt::CannedAnswer;
use crate::tool::Tool;

/// One step of a scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EditorEvent {
    /// Pick a tool.
    Tool {
        /// The tool.
        tool: Tool,
    },
    /// Click at a canvas point.
    Click {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Press the pointer at a canvas point.
    Press {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Move the pointer.
    Move {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Release the pointer.
    Release,
    /// The pointer left the canvas.
    Leave,
    /// Edit a location's properties.
    UpdateLocation {
        /// Location to edit.
        id: String,
        /// Fields to change.
        patch: LocationPatch,
    },
    /// Delete a location.
    RemoveLocation {
        /// Location to delete.
        id: String,
    },
    /// Edit a connection.
    UpdateConnection {
        /// One endpoint.
        from: String,
        /// The other endpoint.
        to: String,
        /// Fields to change.
        patch: ConnectionPatch,
    },
    /// Delete a connection.
    RemoveConnection {
        /// One endpoint.
        from: String,
        /// The other endpoint.
        to: String,
    },
    /// Answer the item prompt for a location; a missing id cancels.
    AttachItem {
        /// Location to place the item in.
        location: String,
        /// The typed id.
        #[serde(default)]
        id: Option<String>,
    },
    /// Answer the character prompt for a location; a missing id cancels.
    AttachCharacter {
        /// Location to place the character in.
        location: String,
        /// The typed id.
        #[serde(default)]
        id: Option<String>,
    },
    /// Take an item out of a location.
    DetachItem {
        /// Location holding the item.
        location: String,
        /// Item id.
        id: String,
    },
    /// Take a character out of a location.
    DetachCharacter {
        /// Location holding the character.
        location: String,
        /// Character id.
        id: String,
    },
    /// Start over.
    Clear,
}

/// Parse a script.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<EditorEvent>> {
    serde_json::from_str(json)
}

impl<S: ModuleService> Editor<S> {
    /// Apply one recorded event. Returns the refusal message, if the event was refused.
    pub async fn apply(&mut self, event: &EditorEvent) -> Option<String> {
        match event {
            EditorEvent::Tool { tool } => {
                self.set_tool(*tool);
                None
            }
            EditorEvent::Click { x, y } => match self.click(Position::new(*x, *y)) {
                Outcome::Rejected(reason) => Some(reason),
                _ => None,
            },
            EditorEvent::Press { x, y } => {
                self.press(Position::new(*x, *y));
                None
            }
            EditorEvent::Move { x, y } => {
                self.move_pointer(Position::new(*x, *y));
                None
            }
            EditorEvent::Release => {
                self.release();
                None
            }
            EditorEvent::Leave => {
                self.leave();
                None
            }
            EditorEvent::UpdateLocation { id, patch } => {
                self.update_location(id, patch.clone()).err().map(|e| e.to_string())
            }
            EditorEvent::RemoveLocation { id } => {
                self.remove_location(id);
                None
            }
            EditorEvent::UpdateConnection { from, to, patch } => self
                .update_connection(from, to, patch.clone())
                .err()
                .map(|e| e.to_string()),
            EditorEvent::RemoveConnection { from, to } => {
                self.remove_connection(from, to);
                None
            }
            EditorEvent::AttachItem { location, id } => self
                .attach_item(location, &CannedAnswer(id.clone()))
                .await
                .err()
                .map(|e| e.to_string()),
            EditorEvent::AttachCharacter { location, id } => self
                .attach_character(location, &CannedAnswer(id.clone()))
                .await
                .err()
                .map(|e| e.to_string()),
            EditorEvent::DetachItem { location, id } => {
                self.detach_item(location, id).err().map(|e| e.to_string())
            }
            EditorEvent::DetachCharacter { location, id } => self
                .detach_character(location, id)
                .err()
                .map(|e| e.to_string()),
            EditorEvent::Clear => {
                self.clear();
                None
            }
        }
    }
}
