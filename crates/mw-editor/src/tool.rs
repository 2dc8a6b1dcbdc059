use std::fmt;

use mw_core::LocationId;
use serde::{Deserialize, Serialize};

/// The tool the author picks from the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    /// Select and drag locations.
    #[default]
    Select,
    /// Place new locations.
    AddLocation,
    /// Join two locations.
    Connect,
    /// Remove locations.
    Delete,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 4] = [Self::Select, Self::AddLocation, Self::Connect, Self::Delete];

    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::AddLocation => "Add Room",
            Self::Connect => "Connect",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Controller state: the active tool plus, in connect mode, the anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Clicking selects; pressing starts a drag.
    #[default]
    Select,
    /// Clicking empty canvas places a location.
    AddLocation,
    /// Clicking two locations joins them. `anchor` is the first one clicked.
    Connect {
        /// Location picked by the first click, if any.
        anchor: Option<LocationId>,
    },
    /// Clicking a location removes it.
    Delete,
}

impl Mode {
    /// Fresh state for `tool`, with no anchor.
    pub fn entering(tool: Tool) -> Self {
        match tool {
            Tool::Select => Self::Select,
            Tool::AddLocation => Self::AddLocation,
            Tool::Connect => Self::Connect { anchor: None },
            Tool::Delete => Self::Delete,
        }
    }

    /// The tool this state belongs to.
    pub fn tool(&self) -> Tool {
        match self {
            Self::Select => Tool::Select,
            Self::AddLocation => Tool::AddLocation,
            Self::Connect { .. } => Tool::Connect,
            Self::Delete => Tool::Delete,
        }
    }

    /// The pending connect anchor.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::Connect { anchor } => anchor.as_deref(),
            _ => None,
        }
    }
}
