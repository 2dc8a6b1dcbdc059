//! The Mapwright editing session.
//!
//! An [`Editor`] owns a [`mw_core::GraphStore`] and drives it from pointer
//! input through a [`Controller`]. Refused edits and validate/export results
//! surface as text on a [`StatusLine`]. The validator and exporter themselves
//! live behind the [`ModuleService`] trait.

/// Validation/export requests.
pub mod client;
/// Editor settings and their TOML form.
pub mod config;
/// The tool-mode state machine.
pub mod controller;
/// The editing session.
pub mod editor;
/// Error types used throughout the crate.
pub mod error;
/// Scripted input for replaying sessions.
pub mod event;
/// Asking the author for ids.
pub mod prompt;
/// The auto-clearing status message.
pub mod status;
/// Toolbar tools and controller modes.
pub mod tool;

/// Re-export client types.
pub use client::{ModuleClient, ModuleService, validation_status};
/// Re-export configuration.
pub use config::EditorConfig;
/// Re-export controller types.
pub use controller::{Controller, Outcome};
/// Re-export the session.
pub use editor::Editor;
/// Re-export error types.
pub use error::{ClientError, ClientResult, ConfigError, ConfigResult};
/// Re-export scripted events.
pub use event::{EditorEvent, parse_script};
/// Re-export prompts.
pub use prompt::{CannedAnswer, IdPrompt};
/// Re-export the status line.
pub use status::StatusLine;
/// Re-export tools.
pub use tool::{Mode, Tool};
/// Re-export the validation result, which callers handle directly.
pub use mw_document::ValidationResult;
