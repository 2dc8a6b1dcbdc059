//! An editing session: the graph plus everything that drives and reports on it.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};
use mw_core::{ConnectResult, ConnectionPatch, GraphResult, GraphStore, LocationPatch, Position};
use mw_document::{ValidationResult, WorldDocument, serialize_with_fallback};

use crate::client::{ModuleClient, ModuleService, validation_status};
use crate::config::EditorConfig;
use crate::controller::{Controller, Outcome};
use crate::error::{ClientError, ClientResult};
use crate::prompt::{IdPrompt, ask_id};
use crate::status::StatusLine;
use crate::tool::Tool;

/// One editing session over a map.
///
/// Owns the graph exclusively. Every refused action leaves the graph as it
/// was and puts a message on the status line.
///
/// Validate and export work on a snapshot of the map and do not borrow the
/// session, so editing continues while a request is pending.
pub struct Editor<S> {
    graph: GraphStore,
    controller: Controller,
    status: Arc<StatusLine>,
    client: Arc<ModuleClient<S>>,
    config: EditorConfig,
    last_validation: Arc<Mutex<Option<ValidationResult>>>,
}

impl<S: ModuleService> Editor<S> {
    /// Start an empty session.
    pub fn new(config: EditorConfig, service: S) -> Self {
        Self {
            graph: GraphStore::new(),
            controller: Controller::new(config.extent()),
            status: Arc::new(StatusLine::new(config.status_delay())),
            client: Arc::new(ModuleClient::new(service)),
            config,
            last_validation: Arc::new(Mutex::new(None)),
        }
    }

    /// The map.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Tool and selection state.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The status message currently showing.
    pub fn status(&self) -> Option<String> {
        self.status.current()
    }

    /// Session settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The findings of the last successful validation.
    pub fn last_validation(&self) -> Option<ValidationResult> {
        self.last_validation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The validation/export client.
    pub fn client(&self) -> &ModuleClient<S> {
        &self.client
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Switch tools.
    pub fn set_tool(&mut self, tool: Tool) {
        self.controller.set_tool(tool);
    }

    /// Click at `point` with the current tool.
    pub fn click(&mut self, point: Position) -> Outcome {
        let outcome = self.controller.click(&mut self.graph, point);
        if let Some(notice) = outcome.notice() {
            self.status.show(notice);
        }
        outcome
    }

    /// Pointer pressed at `point`.
    pub fn press(&mut self, point: Position) -> bool {
        self.controller.press(&self.graph, point)
    }

    /// Pointer moved to `point`.
    pub fn move_pointer(&mut self, point: Position) -> bool {
        self.controller.move_to(&mut self.graph, point)
    }

    /// Pointer released.
    pub fn release(&mut self) {
        self.controller.release();
    }

    /// Pointer left the canvas.
    pub fn leave(&mut self) {
        self.controller.leave();
    }

    // -----------------------------------------------------------------------
    // Property edits
    // -----------------------------------------------------------------------

    /// Edit a location's properties, including renaming it.
    pub fn update_location(&mut self, id: &str, patch: LocationPatch) -> GraphResult<()> {
        let new_id = patch.id.clone();
        self.graph
            .update_location(id, patch)
            .inspect_err(|e| self.reject(e))?;
        if let Some(new_id) = new_id {
            self.controller.location_renamed(id, &new_id);
        }
        Ok(())
    }

    /// Delete a location from the property panel.
    pub fn remove_location(&mut self, id: &str) -> bool {
        self.controller.location_removed(id);
        self.graph.remove_location(id).is_some()
    }

    /// Edit a connection's directions or lock.
    pub fn update_connection(&mut self, a: &str, b: &str, patch: ConnectionPatch) -> ConnectResult<()> {
        self.graph
            .update_connection(a, b, patch)
            .inspect_err(|e| self.reject(e))
    }

    /// Delete the connection between `a` and `b`.
    pub fn remove_connection(&mut self, a: &str, b: &str) -> bool {
        self.graph.remove_connection(a, b).is_some()
    }

    /// Ask for an item id and place that item in `location_id`.
    ///
    /// Returns the id attached, or `None` if the prompt was cancelled.
    pub async fn attach_item(
        &mut self,
        location_id: &str,
        prompt: &impl IdPrompt,
    ) -> GraphResult<Option<String>> {
        let Some(item_id) = ask_id(prompt, "Item id").await else {
            return Ok(None);
        };
        let (id, _) = self
            .graph
            .attach_item(location_id, &item_id)
            .inspect_err(|e| self.reject(e))?;
        Ok(Some(id))
    }

    /// Ask for a character id and place that character in `location_id`.
    pub async fn attach_character(
        &mut self,
        location_id: &str,
        prompt: &impl IdPrompt,
    ) -> GraphResult<Option<String>> {
        let Some(character_id) = ask_id(prompt, "Character id").await else {
            return Ok(None);
        };
        let (id, _) = self
            .graph
            .attach_character(location_id, &character_id)
            .inspect_err(|e| self.reject(e))?;
        Ok(Some(id))
    }

    /// Take an item out of a location.
    pub fn detach_item(&mut self, location_id: &str, item_id: &str) -> GraphResult<bool> {
        self.graph
            .detach_item(location_id, item_id)
            .inspect_err(|e| self.reject(e))
    }

    /// Take a character out of a location.
    pub fn detach_character(&mut self, location_id: &str, character_id: &str) -> GraphResult<bool> {
        self.graph
            .detach_character(location_id, character_id)
            .inspect_err(|e| self.reject(e))
    }

    /// Start over with an empty map.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.controller.reset();
        self.status.clear();
        *self
            .last_validation
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    // -----------------------------------------------------------------------
    // Validate / export
    // -----------------------------------------------------------------------

    /// The map as an engine document.
    pub fn document(&self) -> WorldDocument {
        serialize_with_fallback(&self.graph, &self.config.document.fallback_start)
    }

    /// Send the current map to the validator and report the outcome.
    ///
    /// The map is captured when this is called. A request made while another
    /// is pending fails with [`ClientError::Busy`].
    pub fn validate(
        &self,
    ) -> impl Future<Output = ClientResult<ValidationResult>> + Send + use<S>
    where
        S: Send + Sync + 'static,
    {
        let doc = self.document();
        let client = Arc::clone(&self.client);
        let status = Arc::clone(&self.status);
        let last_validation = Arc::clone(&self.last_validation);
        async move {
            match client.validate(&doc).await {
                Ok(result) => {
                    status.show(validation_status(&result));
                    *last_validation
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = Some(result.clone());
                    Ok(result)
                }
                Err(e) => {
                    status.show(match &e {
                        ClientError::Service(msg) => format!("Validation error: {msg}"),
                        other => other.to_string(),
                    });
                    warn!("validation failed: {e}");
                    Err(e)
                }
            }
        }
    }

    /// Export the current map as module `name`.
    pub fn export(
        &self,
        name: &str,
    ) -> impl Future<Output = ClientResult<PathBuf>> + Send + use<S>
    where
        S: Send + Sync + 'static,
    {
        let doc = self.document();
        let name = name.to_string();
        let client = Arc::clone(&self.client);
        let status = Arc::clone(&self.status);
        async move {
            match client.export(&name, &doc).await {
                Ok(path) => {
                    status.show(format!("Exported to: {}", path.display()));
                    Ok(path)
                }
                Err(e) => {
                    status.show(match &e {
                        ClientError::Service(msg) => format!("Export failed: {msg}"),
                        other => other.to_string(),
                    });
                    info!("export refused: {e}");
                    Err(e)
                }
            }
        }
    }

    fn reject(&self, error: &impl std::fmt::Display) {
        warn!("rejected edit: {error}");
        self.status.show(error.to_string());
    }
}
