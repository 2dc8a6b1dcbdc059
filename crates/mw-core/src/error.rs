use crate::direction::Direction;
use crate::location::LocationId;

/// Alias for `Result<T, GraphError>`.
pub type GraphResult<T> = Result<T, GraphError>;

/// Alias for `Result<T, ConnectError>`.
pub type ConnectResult<T> = Result<T, ConnectError>;

/// Errors from location and registry operations on the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The requested location id does not exist.
    #[error("location not found: \"{0}\"")]
    LocationNotFound(LocationId),

    /// Another location already uses this id.
    #[error("location already exists: \"{0}\"")]
    DuplicateLocation(LocationId),

    /// An id (location, item, or character) is empty after normalisation.
    #[error("id must not be empty")]
    EmptyId,
}

/// Reasons a connection cannot be created or edited.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// The two locations are already connected (in either order).
    #[error("these rooms are already connected")]
    DuplicateConnection,

    /// The location has used up all six directions.
    #[error("no available directions at \"{0}\"")]
    DirectionUnavailable(LocationId),

    /// The requested direction is already an exit of that location.
    #[error("\"{location}\" already has an exit {direction}")]
    DirectionTaken {
        /// The location whose exit collides.
        location: LocationId,
        /// The direction in use.
        direction: Direction,
    },

    /// A connection cannot start and end at the same location.
    #[error("cannot connect \"{0}\" to itself")]
    SelfLoop(LocationId),

    /// An endpoint does not exist.
    #[error("location not found: \"{0}\"")]
    UnknownLocation(LocationId),

    /// No connection joins the two locations.
    #[error("no connection between \"{0}\" and \"{1}\"")]
    NotConnected(LocationId, LocationId),

    /// A locked connection needs a key item.
    #[error("a locked connection needs a key")]
    MissingKey,
}
