//! Turns pointer input into graph mutations.
//!
//! The controller never renders anything. Callers resolve their own input
//! events to canvas points and feed them in; the controller looks up which
//! location (if any) is under the point and acts according to the current
//! [`Mode`].

use log::{debug, warn};
use mw_core::{ConnectError, Connection, Extent, GraphStore, LocationId, Position, infer_directions};

use crate::tool::{Mode, Tool};

/// Status text when inference finds no free direction pair.
pub const NO_DIRECTIONS: &str = "No available directions for connection.";
/// Status text when the two locations are already joined.
pub const ALREADY_CONNECTED: &str = "These rooms are already connected.";

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing happened.
    Ignored,
    /// A location became the selection.
    Selected(LocationId),
    /// The selection (and any connect anchor) was dropped.
    SelectionCleared,
    /// A location was placed and selected.
    Added(LocationId),
    /// A location was removed.
    Removed(LocationId),
    /// The first location of a connection was picked.
    Anchored(LocationId),
    /// The pending anchor was cancelled.
    AnchorCleared,
    /// A connection was created.
    Connected(Connection),
    /// The action was refused; the graph is unchanged.
    Rejected(String),
}

impl Outcome {
    /// Text for the status line, for outcomes that need one.
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Rejected(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Drag {
    id: LocationId,
    /// Pointer position minus the location's origin at drag start.
    offset: Position,
}

/// The tool-mode state machine.
#[derive(Debug, Clone)]
pub struct Controller {
    mode: Mode,
    selected: Option<LocationId>,
    drag: Option<Drag>,
    extent: Extent,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Extent::default())
    }
}

impl Controller {
    /// A controller in select mode for location boxes of size `extent`.
    pub fn new(extent: Extent) -> Self {
        Self {
            mode: Mode::Select,
            selected: None,
            drag: None,
            extent,
        }
    }

    /// Current state.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.mode.tool()
    }

    /// Pending connect anchor.
    pub fn anchor(&self) -> Option<&str> {
        self.mode.anchor()
    }

    /// Selected location.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Location being dragged.
    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.id.as_str())
    }

    /// Location box size used for hit testing and placement.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Switch tools. Drops any connect anchor and any drag in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        debug!("tool: {} -> {}", self.mode.tool(), tool);
        self.mode = Mode::entering(tool);
        self.drag = None;
    }

    /// Handle a click at `point`.
    pub fn click(&mut self, graph: &mut GraphStore, point: Position) -> Outcome {
        let hit = graph
            .location_at(point, self.extent)
            .map(|loc| loc.id.clone());
        let tool = self.mode.tool();

        match (tool, hit) {
            (Tool::AddLocation, None) => self.place(graph, point),
            (Tool::AddLocation, Some(_)) => Outcome::Ignored,
            (_, None) => {
                self.selected = None;
                if let Mode::Connect { anchor } = &mut self.mode {
                    *anchor = None;
                }
                Outcome::SelectionCleared
            }
            (Tool::Select, Some(id)) => {
                self.selected = Some(id.clone());
                Outcome::Selected(id)
            }
            (Tool::Delete, Some(id)) => {
                graph.remove_location(&id);
                self.location_removed(&id);
                Outcome::Removed(id)
            }
            (Tool::Connect, Some(id)) => self.connect_click(graph, id),
        }
    }

    /// Pointer pressed at `point`. In select mode, pressing a location selects
    /// it and starts dragging it. Returns whether a drag started.
    pub fn press(&mut self, graph: &GraphStore, point: Position) -> bool {
        if self.mode != Mode::Select {
            return false;
        }
        let Some(loc) = graph.location_at(point, self.extent) else {
            return false;
        };
        self.selected = Some(loc.id.clone());
        self.drag = Some(Drag {
            id: loc.id.clone(),
            offset: point.minus(loc.position),
        });
        true
    }

    /// Pointer moved to `point`. Moves the dragged location so it keeps its
    /// offset from the pointer. Returns whether anything moved.
    pub fn move_to(&mut self, graph: &mut GraphStore, point: Position) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        match graph.move_location(&drag.id, point.minus(drag.offset)) {
            Ok(()) => true,
            Err(_) => {
                self.drag = None;
                false
            }
        }
    }

    /// Pointer released: the drag, if any, ends.
    pub fn release(&mut self) {
        self.drag = None;
    }

    /// Pointer left the canvas: the drag, if any, ends.
    pub fn leave(&mut self) {
        self.drag = None;
    }

    /// Follow a rename made outside the controller.
    pub fn location_renamed(&mut self, old_id: &str, new_id: &str) {
        if self.selected.as_deref() == Some(old_id) {
            self.selected = Some(new_id.to_string());
        }
        if let Mode::Connect {
            anchor: Some(anchor),
        } = &mut self.mode
        {
            if *anchor == old_id {
                *anchor = new_id.to_string();
            }
        }
        if let Some(drag) = self.drag.as_mut().filter(|d| d.id == old_id) {
            drag.id = new_id.to_string();
        }
    }

    /// Forget every reference to a removed location.
    pub fn location_removed(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if let Mode::Connect { anchor } = &mut self.mode {
            if anchor.as_deref() == Some(id) {
                *anchor = None;
            }
        }
        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }
    }

    /// Drop selection, anchor, and drag, keeping the current tool.
    pub fn reset(&mut self) {
        self.mode = Mode::entering(self.mode.tool());
        self.selected = None;
        self.drag = None;
    }

    fn place(&mut self, graph: &mut GraphStore, point: Position) -> Outcome {
        match graph.add_location(point.minus(self.extent.half())) {
            Ok(loc) => {
                self.selected = Some(loc.id.clone());
                self.set_tool(Tool::Select);
                Outcome::Added(loc.id)
            }
            Err(e) => {
                warn!("could not place location: {e}");
                Outcome::Rejected(e.to_string())
            }
        }
    }

    fn connect_click(&mut self, graph: &mut GraphStore, id: LocationId) -> Outcome {
        let Some(anchor) = self.mode.anchor().map(str::to_string) else {
            self.mode = Mode::Connect {
                anchor: Some(id.clone()),
            };
            return Outcome::Anchored(id);
        };
        if anchor == id {
            self.mode = Mode::Connect { anchor: None };
            return Outcome::AnchorCleared;
        }

        let outcome = connect(graph, &anchor, &id);
        // Success or not, the attempt is over.
        self.set_tool(Tool::Select);
        outcome
    }
}

fn connect(graph: &mut GraphStore, from_id: &str, to_id: &str) -> Outcome {
    let Some(from) = graph.location(from_id) else {
        return unknown(from_id);
    };
    let Some(to) = graph.location(to_id) else {
        return unknown(to_id);
    };
    let Some((from_dir, to_dir)) = infer_directions(from, to, graph.connections()) else {
        warn!("no free directions between {from_id} and {to_id}");
        return Outcome::Rejected(NO_DIRECTIONS.to_string());
    };

    match graph.add_connection(Connection::new(from_id, to_id, from_dir, to_dir)) {
        Ok(conn) => Outcome::Connected(conn),
        Err(ConnectError::DuplicateConnection) => {
            warn!("{from_id} and {to_id} are already connected");
            Outcome::Rejected(ALREADY_CONNECTED.to_string())
        }
        Err(ConnectError::DirectionUnavailable(_)) => Outcome::Rejected(NO_DIRECTIONS.to_string()),
        Err(e) => {
            warn!("could not connect {from_id} to {to_id}: {e}");
            Outcome::Rejected(format!("Could not connect: {e}"))
        }
    }
}

fn unknown(id: &str) -> Outcome {
    warn!("cannot connect missing location {id}");
    Outcome::Rejected(ConnectError::UnknownLocation(id.to_string()).to_string())
}
