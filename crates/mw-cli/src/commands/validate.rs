use std::path::Path;

use mw_editor::{EditorConfig, ModuleService};

use crate::service::LocalModuleService;

/// Print the findings for `file`; fails if the module has errors.
pub async fn run(file: &Path, config: &EditorConfig) -> Result<(), String> {
    let json = super::read_file(file)?;
    let service = LocalModuleService::new(&config.export.modules_dir);
    let result = service.validate(json).await?;

    if let Some(table) = super::findings_table(&result) {
        println!("{table}");
        println!();
    }
    println!("  {}", super::summary(&result));

    if result.valid {
        Ok(())
    } else {
        Err(format!("{} is not a valid module", file.display()))
    }
}
