//! Command-line frontend for the Mapwright map editor.

mod commands;
mod service;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use mw_editor::EditorConfig;

#[derive(Parser)]
#[command(
    name = "mw",
    about = "Mapwright: build, check, and export interactive-fiction maps",
    version,
    propagate_version = true
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Editor configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a module file and list its errors and warnings
    Validate {
        /// Module file (JSON world document)
        file: PathBuf,
    },

    /// Check a module file and copy it into the modules directory
    Export {
        /// Module name; the file is named after it
        name: String,

        /// Module file (JSON world document)
        file: PathBuf,

        /// Directory to export into (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Run a recorded editing session and print the resulting module
    Replay {
        /// Script file: a JSON array of editor events
        script: PathBuf,

        /// Write the module here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Validate the result
        #[arg(long)]
        validate: bool,

        /// Export the result under this module name
        #[arg(long)]
        export: Option<String>,

        /// Directory to export into (default: from config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Write a configuration file with every default filled in
    InitConfig {
        /// Where to write it
        path: PathBuf,

        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(command: Commands, config: EditorConfig) -> Result<(), String> {
    match command {
        Commands::Validate { file } => commands::validate::run(&file, &config).await,
        Commands::Export {
            name,
            file,
            out_dir,
        } => commands::export::run(&name, &file, out_dir, &config).await,
        Commands::Replay {
            script,
            output,
            validate,
            export,
            out_dir,
        } => {
            let options = commands::replay::Options {
                output,
                validate,
                export,
                out_dir,
            };
            commands::replay::run(&script, options, config).await
        }
        Commands::InitConfig { path, force } => commands::init_config::run(&path, force),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<EditorConfig, String> {
    match path {
        Some(path) => EditorConfig::load(path).map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
