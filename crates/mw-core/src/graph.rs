use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::connection::{Connection, ConnectionPatch};
use crate::direction::Direction;
use crate::error::{ConnectError, ConnectResult, GraphError, GraphResult};
use crate::location::{Extent, Location, LocationId, LocationPatch, Position};
use crate::registry::{Character, Item, normalize_reference_id};

/// First number handed out by the "Room N" name counter.
const FIRST_ROOM_NUMBER: u32 = 1;

/// The editable world map. Owns all locations, connections, and registry records.
///
/// Every public mutation either applies fully or returns an error and leaves
/// the store untouched.
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Locations in creation order; the first one is the start location.
    locations: Vec<Location>,
    connections: Vec<Connection>,
    items: BTreeMap<String, Item>,
    characters: BTreeMap<String, Character>,
    next_room_number: u32,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            connections: Vec::new(),
            items: BTreeMap::new(),
            characters: BTreeMap::new(),
            next_room_number: FIRST_ROOM_NUMBER,
        }
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    /// Place a new location named "Room N" at `position` (clamped to the canvas).
    ///
    /// N is never reused within a session, even after deletions or a failed
    /// placement.
    pub fn add_location(&mut self, position: Position) -> GraphResult<Location> {
        let name = format!("Room {}", self.next_room_number);
        self.next_room_number += 1;

        let location = Location::new(name, position);
        if self.contains_location(&location.id) {
            return Err(GraphError::DuplicateLocation(location.id));
        }

        debug!(
            "added location {} at ({}, {})",
            location.id, location.position.x, location.position.y
        );
        self.locations.push(location.clone());
        Ok(location)
    }

    /// Get a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    fn location_mut(&mut self, id: &str) -> GraphResult<&mut Location> {
        self.locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| GraphError::LocationNotFound(id.to_string()))
    }

    /// Whether a location with this id exists.
    pub fn contains_location(&self, id: &str) -> bool {
        self.location(id).is_some()
    }

    /// All locations, in creation order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The topmost location whose box contains `point`.
    ///
    /// Later locations are drawn over earlier ones, so the search runs newest first.
    pub fn location_at(&self, point: Position, extent: Extent) -> Option<&Location> {
        self.locations
            .iter()
            .rev()
            .find(|l| l.contains(point, extent))
    }

    /// Apply a property patch to a location.
    ///
    /// Renaming rewrites the endpoints of every connection that referenced the
    /// old id and touches nothing else.
    pub fn update_location(&mut self, id: &str, patch: LocationPatch) -> GraphResult<()> {
        if !self.contains_location(id) {
            return Err(GraphError::LocationNotFound(id.to_string()));
        }
        let rename = patch.id.as_deref().filter(|new_id| *new_id != id);
        if let Some(new_id) = rename {
            if new_id.is_empty() {
                return Err(GraphError::EmptyId);
            }
            if self.contains_location(new_id) {
                return Err(GraphError::DuplicateLocation(new_id.to_string()));
            }
        }

        let location = self.location_mut(id)?;
        if let Some(name) = patch.name {
            location.name = name;
        }
        if let Some(description) = patch.description {
            location.description = description;
        }
        if let Some(position) = patch.position {
            location.position = position.clamped();
        }
        if let Some(mood) = patch.mood {
            location.mood = mood;
        }
        if let Some(examine_details) = patch.examine_details {
            location.examine_details = examine_details;
        }

        if let Some(new_id) = patch.id.filter(|new_id| new_id != id) {
            location.id = new_id.clone();
            for conn in &mut self.connections {
                if conn.from_id == id {
                    conn.from_id = new_id.clone();
                }
                if conn.to_id == id {
                    conn.to_id = new_id.clone();
                }
            }
            debug!("renamed location {id} to {new_id}");
        }
        Ok(())
    }

    /// Move a location, clamping to non-negative coordinates.
    pub fn move_location(&mut self, id: &str, position: Position) -> GraphResult<()> {
        self.location_mut(id)?.position = position.clamped();
        Ok(())
    }

    /// Delete a location and every connection touching it.
    ///
    /// Removing an id that does not exist is a no-op and returns `None`.
    pub fn remove_location(&mut self, id: &str) -> Option<Location> {
        let index = self.locations.iter().position(|l| l.id == id)?;
        let location = self.locations.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        debug!(
            "removed location {id} and {} connection(s)",
            before - self.connections.len()
        );
        Some(location)
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// All connections, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections with `id` as either endpoint.
    pub fn connections_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    /// The connection joining `a` and `b`, in either order.
    pub fn connection_between(&self, a: &str, b: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.joins(a, b))
    }

    /// Directions already used as exits of `id`.
    pub fn used_directions(&self, id: &str) -> BTreeSet<Direction> {
        self.connections_of(id)
            .filter_map(|c| c.direction_at(id))
            .collect()
    }

    /// Add a connection.
    ///
    /// Fails with [`ConnectError::DuplicateConnection`] if the pair is already
    /// connected and with [`ConnectError::DirectionUnavailable`] if either end
    /// has all six exits in use.
    pub fn add_connection(&mut self, conn: Connection) -> ConnectResult<Connection> {
        if conn.from_id == conn.to_id {
            return Err(ConnectError::SelfLoop(conn.from_id));
        }
        for id in [&conn.from_id, &conn.to_id] {
            if !self.contains_location(id) {
                return Err(ConnectError::UnknownLocation(id.clone()));
            }
        }
        if conn.locked && conn.key_id.is_none() {
            return Err(ConnectError::MissingKey);
        }
        if self.connection_between(&conn.from_id, &conn.to_id).is_some() {
            return Err(ConnectError::DuplicateConnection);
        }
        for (id, dir) in [(&conn.from_id, conn.from_dir), (&conn.to_id, conn.to_dir)] {
            let used = self.used_directions(id);
            if used.len() == Direction::ALL.len() {
                return Err(ConnectError::DirectionUnavailable(id.clone()));
            }
            if used.contains(&dir) {
                return Err(ConnectError::DirectionTaken {
                    location: id.clone(),
                    direction: dir,
                });
            }
        }

        debug!(
            "connected {} ({}) <-> {} ({})",
            conn.from_id, conn.from_dir, conn.to_id, conn.to_dir
        );
        self.connections.push(conn.clone());
        Ok(conn)
    }

    /// Edit the directions or lock of the connection joining `a` and `b`.
    pub fn update_connection(&mut self, a: &str, b: &str, patch: ConnectionPatch) -> ConnectResult<()> {
        let index = self
            .connections
            .iter()
            .position(|c| c.joins(a, b))
            .ok_or_else(|| ConnectError::NotConnected(a.to_string(), b.to_string()))?;

        let mut updated = self.connections[index].clone();
        if let Some(dir) = patch.from_dir {
            updated.from_dir = dir;
        }
        if let Some(dir) = patch.to_dir {
            updated.to_dir = dir;
        }
        if let Some(locked) = patch.locked {
            updated.locked = locked;
        }
        if let Some(key_id) = patch.key_id {
            updated.key_id = key_id;
        }
        if updated.locked && updated.key_id.is_none() {
            return Err(ConnectError::MissingKey);
        }

        // Directions must stay unique among the *other* exits of each endpoint.
        for (id, dir) in [(&updated.from_id, updated.from_dir), (&updated.to_id, updated.to_dir)] {
            let taken = self
                .connections
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .any(|(_, c)| c.direction_at(id) == Some(dir));
            if taken {
                return Err(ConnectError::DirectionTaken {
                    location: id.clone(),
                    direction: dir,
                });
            }
        }

        self.connections[index] = updated;
        Ok(())
    }

    /// Remove the connection joining `a` and `b`, if any.
    pub fn remove_connection(&mut self, a: &str, b: &str) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.joins(a, b))?;
        debug!("disconnected {a} <-> {b}");
        Some(self.connections.remove(index))
    }

    // -----------------------------------------------------------------------
    // Registries
    // -----------------------------------------------------------------------

    /// All item records, keyed by id.
    pub fn items(&self) -> &BTreeMap<String, Item> {
        &self.items
    }

    /// All character records, keyed by id.
    pub fn characters(&self) -> &BTreeMap<String, Character> {
        &self.characters
    }

    /// Get an item record.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Get a character record.
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    /// Place an item in a location, creating a placeholder record if the id is new.
    ///
    /// The id is normalised first (see [`normalize_reference_id`]). Returns the
    /// normalised id and whether a new reference was added; attaching an item
    /// that is already there changes nothing.
    pub fn attach_item(&mut self, location_id: &str, item_id: &str) -> GraphResult<(String, bool)> {
        let id = normalize_reference_id(item_id).ok_or(GraphError::EmptyId)?;
        let location = self.location_mut(location_id)?;
        let added = push_unique(&mut location.item_ids, &id);
        self.items
            .entry(id.clone())
            .or_insert_with(|| Item::placeholder(id.clone()));
        debug!("attached item {id} to {location_id} (new reference: {added})");
        Ok((id, added))
    }

    /// Remove an item reference from a location. The registry record stays.
    pub fn detach_item(&mut self, location_id: &str, item_id: &str) -> GraphResult<bool> {
        let location = self.location_mut(location_id)?;
        Ok(remove_all(&mut location.item_ids, item_id))
    }

    /// Place a character in a location, creating a placeholder record if the id is new.
    pub fn attach_character(
        &mut self,
        location_id: &str,
        character_id: &str,
    ) -> GraphResult<(String, bool)> {
        let id = normalize_reference_id(character_id).ok_or(GraphError::EmptyId)?;
        let location = self.location_mut(location_id)?;
        let added = push_unique(&mut location.character_ids, &id);
        self.characters
            .entry(id.clone())
            .or_insert_with(|| Character::placeholder(id.clone()));
        debug!("attached character {id} to {location_id} (new reference: {added})");
        Ok((id, added))
    }

    /// Remove a character reference from a location. The registry record stays.
    pub fn detach_character(&mut self, location_id: &str, character_id: &str) -> GraphResult<bool> {
        let location = self.location_mut(location_id)?;
        Ok(remove_all(&mut location.character_ids, character_id))
    }

    // -----------------------------------------------------------------------
    // Whole-graph operations
    // -----------------------------------------------------------------------

    /// Empty every collection and restart the name counter.
    pub fn clear(&mut self) {
        *self = Self::new();
        debug!("cleared graph");
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Ids of every location, in creation order.
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.iter().map(|l| l.id.clone()).collect()
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

fn remove_all(ids: &mut Vec<String>, id: &str) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing != id);
    ids.len() != before
}
