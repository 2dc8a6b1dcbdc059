use std::path::{Path, PathBuf};

use colored::Colorize;
use log::warn;
use mw_editor::{Editor, EditorConfig, parse_script};

use crate::service::LocalModuleService;

/// What to do after the script has run.
pub struct Options {
    /// Write the document here instead of stdout.
    pub output: Option<PathBuf>,
    /// Validate the result.
    pub validate: bool,
    /// Export the result under this name.
    pub export: Option<String>,
    /// Export directory overriding the configured one.
    pub out_dir: Option<PathBuf>,
}

/// Apply every event in `script` to a fresh editor, then emit the document.
pub async fn run(script: &Path, options: Options, config: EditorConfig) -> Result<(), String> {
    let text = super::read_file(script)?;
    let events = parse_script(&text).map_err(|e| format!("{}: {e}", script.display()))?;

    let modules_dir = options
        .out_dir
        .unwrap_or_else(|| config.export.modules_dir.clone());
    let mut editor = Editor::new(config, LocalModuleService::new(modules_dir));

    let mut refused = 0;
    for (index, event) in events.iter().enumerate() {
        if let Some(reason) = editor.apply(event).await {
            refused += 1;
            warn!("event {} refused: {reason}", index + 1);
            eprintln!("  {} event {}: {reason}", "refused".yellow(), index + 1);
        }
    }

    let graph = editor.graph();
    eprintln!(
        "  {} events, {} refused; {} locations, {} connections",
        events.len(),
        refused,
        graph.location_count(),
        graph.connection_count()
    );

    let json = editor
        .document()
        .to_json_pretty()
        .map_err(|e| format!("cannot encode module: {e}"))?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
            eprintln!("  Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    if options.validate {
        let result = editor.validate().await.map_err(|e| e.to_string())?;
        if let Some(table) = super::findings_table(&result) {
            eprintln!("{table}");
        }
        eprintln!("  {}", super::summary(&result));
        if !result.valid {
            return Err("the replayed map is not a valid module".into());
        }
    }

    if let Some(name) = &options.export {
        let path = editor.export(name).await.map_err(|e| e.to_string())?;
        eprintln!("  Exported to: {}", path.display());
    }

    Ok(())
}
