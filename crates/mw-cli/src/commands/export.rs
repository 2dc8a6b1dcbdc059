use std::path::{Path, PathBuf};

use mw_document::WorldDocument;
use mw_editor::{EditorConfig, ModuleClient};

use crate::service::LocalModuleService;

/// Validate `file` and write it into the modules directory as `name`.
pub async fn run(
    name: &str,
    file: &Path,
    out_dir: Option<PathBuf>,
    config: &EditorConfig,
) -> Result<(), String> {
    let json = super::read_file(file)?;
    let doc = WorldDocument::from_json(&json).map_err(|e| format!("{}: {e}", file.display()))?;

    let modules_dir = out_dir.unwrap_or_else(|| config.export.modules_dir.clone());
    let client = ModuleClient::new(LocalModuleService::new(modules_dir));
    let path = client.export(name, &doc).await.map_err(|e| e.to_string())?;

    println!("  Exported to: {}", path.display());
    Ok(())
}
