/// `mw export`
pub mod export;
/// `mw init-config`
pub mod init_config;
/// `mw replay`
pub mod replay;
/// `mw validate`
pub mod validate;

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mw_editor::{ValidationResult, validation_status};

/// Read a whole input file.
fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Findings as a two-column table, errors first. `None` when there are none.
fn findings_table(result: &ValidationResult) -> Option<Table> {
    if result.errors.is_empty() && result.warnings.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Severity", "Finding"]);
    for error in &result.errors {
        table.add_row(vec!["error", error.as_str()]);
    }
    for warning in &result.warnings {
        table.add_row(vec!["warning", warning.as_str()]);
    }
    Some(table)
}

/// The status line for a validation, coloured by outcome.
fn summary(result: &ValidationResult) -> String {
    let status = validation_status(result);
    if !result.valid {
        status.red().to_string()
    } else if result.warnings.is_empty() {
        status.green().to_string()
    } else {
        status.yellow().to_string()
    }
}
