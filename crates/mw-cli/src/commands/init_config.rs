use std::path::Path;

use mw_editor::EditorConfig;

/// Write the default configuration to `path`.
pub fn run(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to replace it)",
            path.display()
        ));
    }

    EditorConfig::default()
        .save(path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created config file {}", path.display());
    Ok(())
}
