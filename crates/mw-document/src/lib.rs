//! The engine's world document and everything that produces or checks one.
//!
//! [`serialize`] projects a [`mw_core::GraphStore`] into a [`WorldDocument`];
//! [`validate_module`] runs the structural checks a module must pass before
//! the engine will load it.

/// Error types for encoding and decoding documents.
pub mod error;
/// The document schema, field for field.
pub mod schema;
/// Graph to document projection.
pub mod serialize;
/// Structural checks on a serialized module.
pub mod validate;

/// Re-export error types.
pub use error::{DocumentError, DocumentResult};
/// Re-export schema types.
pub use schema::{Difficulty, GameMode, LocationRecord, PlayerRecord, WorldDocument};
/// Re-export the serializer.
pub use serialize::{FALLBACK_START, serialize, serialize_with_fallback};
/// Re-export module checks.
pub use validate::{ValidationResult, validate_document, validate_module};
