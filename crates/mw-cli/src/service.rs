//! The validator and exporter, run in-process.

use std::path::PathBuf;

use log::info;
use mw_document::{ValidationResult, validate_document};
use mw_editor::ModuleService;

/// Checks modules locally and writes exports under `modules_dir`.
#[derive(Debug, Clone)]
pub struct LocalModuleService {
    modules_dir: PathBuf,
}

impl LocalModuleService {
    /// A service exporting into `modules_dir`, created on first export.
    pub fn new(modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            modules_dir: modules_dir.into(),
        }
    }
}

/// `Haunted Keep` is stored as `haunted_keep.json`.
///
/// Names that could leave the modules directory are refused.
pub fn module_file_name(name: &str) -> Result<String, String> {
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(format!("Invalid module name: {name}"));
    }
    Ok(format!("{}.json", name.to_lowercase().replace(' ', "_")))
}

impl ModuleService for LocalModuleService {
    async fn validate(&self, json: String) -> Result<ValidationResult, String> {
        Ok(validate_document(&json))
    }

    async fn export(&self, name: String, json: String) -> Result<PathBuf, String> {
        let file_name = module_file_name(&name)?;
        let validation = validate_document(&json);
        if !validation.valid {
            return Err(format!("Module has errors: {}", validation.errors.join(", ")));
        }

        tokio::fs::create_dir_all(&self.modules_dir)
            .await
            .map_err(|e| format!("cannot create {}: {e}", self.modules_dir.display()))?;

        let parsed: serde_json::Value = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        let pretty = serde_json::to_string_pretty(&parsed).map_err(|e| e.to_string())?;

        let path = self.modules_dir.join(file_name);
        tokio::fs::write(&path, pretty)
            .await
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        info!("wrote module {name} to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(module_file_name("Haunted Keep").unwrap(), "haunted_keep.json");
        assert_eq!(module_file_name("keep").unwrap(), "keep.json");
        for name in ["../escaped", "a/b", "a\\b", ".."] {
            assert!(module_file_name(name).is_err(), "{name}");
        }
    }

    #[tokio::test]
    async fn export_refuses_invalid_module() {
        let dir = tempfile::tempdir().unwrap();
        let service = LocalModuleService::new(dir.path());
        let err = service
            .export("empty".into(), "{}".into())
            .await
            .unwrap_err();
        assert!(err.starts_with("Module has errors"));
        assert!(!dir.path().join("empty.json").exists());
    }

    #[tokio::test]
    async fn export_stays_inside_modules_dir() {
        let dir = tempfile::tempdir().unwrap();
        let modules = dir.path().join("modules");
        let service = LocalModuleService::new(&modules);
        let mut graph = mw_core::GraphStore::new();
        graph.add_location(mw_core::Position::new(0.0, 0.0)).unwrap();
        let json = mw_document::serialize(&graph).to_json().unwrap();

        let err = service
            .export("../escaped".into(), json.clone())
            .await
            .unwrap_err();
        assert_eq!(err, "Invalid module name: ../escaped");
        assert!(!dir.path().join("escaped.json").exists());

        let path = service.export("Keep".into(), json).await.unwrap();
        assert_eq!(path, modules.join("keep.json"));
    }
}
