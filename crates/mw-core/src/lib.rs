//! Core types for Mapwright: locations, connections, registries, and the map graph.
//!
//! This crate owns the editable world map. It knows nothing about pointers,
//! screens, or the engine's document format. Drive a [`GraphStore`]
//! programmatically and hand it to the serializer in `mw-document`.

/// Connections (directional exits) between locations.
pub mod connection;
/// The six compass directions and their opposites.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// The graph store that owns every location, connection, and registry record.
pub mod graph;
/// Direction inference for new connections.
pub mod infer;
/// Locations (map nodes), positions, and moods.
pub mod location;
/// Item and character registries with their default templates.
pub mod registry;

/// Re-export connection types.
pub use connection::{Connection, ConnectionPatch};
/// Re-export the direction type.
pub use direction::Direction;
/// Re-export error types.
pub use error::{ConnectError, ConnectResult, GraphError, GraphResult};
/// Re-export the graph store.
pub use graph::GraphStore;
/// Re-export direction inference.
pub use infer::infer_directions;
/// Re-export location types.
pub use location::{Extent, Location, LocationId, LocationPatch, Mood, Position, slugify};
/// Re-export registry record types.
pub use registry::{Character, Item};
