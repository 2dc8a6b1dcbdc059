//! Requests to the module validator and exporter.
//!
//! The checking and writing happen in an external service behind
//! [`ModuleService`]. [`ModuleClient`] encodes the document, refuses to send
//! an export without a name, and lets only one request run at a time.

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use mw_document::{ValidationResult, WorldDocument};

use crate::error::{ClientError, ClientResult};

/// The external validator/exporter.
pub trait ModuleService {
    /// Check a serialized document.
    fn validate(&self, json: String) -> impl Future<Output = Result<ValidationResult, String>> + Send;

    /// Store a serialized document as module `name`; returns where it went.
    fn export(&self, name: String, json: String) -> impl Future<Output = Result<PathBuf, String>> + Send;
}

/// Status text summarising a validation result.
pub fn validation_status(result: &ValidationResult) -> String {
    match (result.valid, result.warning_count()) {
        (true, 0) => "Module is valid.".to_string(),
        (true, n) => format!("Module is valid with {n} warning(s)."),
        (false, n) => format!(
            "Validation found {} error(s), {n} warning(s).",
            result.error_count()
        ),
    }
}

/// Sends documents to a [`ModuleService`], one request at a time.
#[derive(Debug)]
pub struct ModuleClient<S> {
    service: S,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ModuleService> ModuleClient<S> {
    /// Wrap a service.
    pub fn new(service: S) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Whether a request is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> ClientResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| ClientError::Busy)
    }

    /// Ask the service to check `doc`.
    pub async fn validate(&self, doc: &WorldDocument) -> ClientResult<ValidationResult> {
        let _guard = self.begin()?;
        let json = encode(doc)?;
        let result = self.service.validate(json).await.map_err(ClientError::Service)?;
        info!(
            "validation: valid={} errors={} warnings={}",
            result.valid,
            result.error_count(),
            result.warning_count()
        );
        Ok(result)
    }

    /// Export `doc` as module `name`.
    ///
    /// An empty or whitespace-only name fails with [`ClientError::EmptyName`]
    /// without contacting the service. The trimmed name is sent.
    pub async fn export(&self, name: &str, doc: &WorldDocument) -> ClientResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }
        let _guard = self.begin()?;
        let json = encode(doc)?;
        let path = self
            .service
            .export(name.to_string(), json)
            .await
            .map_err(ClientError::Service)?;
        info!("exported module {name} to {}", path.display());
        Ok(path)
    }
}

fn encode(doc: &WorldDocument) -> ClientResult<String> {
    doc.to_json().map_err(|e| ClientError::Encode(e.to_string()))
}
