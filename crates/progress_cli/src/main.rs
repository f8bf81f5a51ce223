//! Command-line front end for progress boards.
//!
//! # Responsibility
//! - Create, inspect and name board files from a terminal.
//! - Keep output plain and deterministic for scripting.

use clap::{Parser, Subcommand};
use progress_core::{
    core_version, default_log_level, init_logging, new_filename_in, Board, LocalFileSystem,
    BACKGROUND_DEFAULT,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "progress", version, about = "Kanban board files from the command line")]
struct Cli {
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "PROGRESS_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "PROGRESS_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an empty board and save it to a new file.
    New {
        name: String,
        #[arg(long, default_value = BACKGROUND_DEFAULT)]
        background: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Load a board file and print its summary.
    Show {
        path: PathBuf,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the type of a background value.
    Classify { value: String },
    /// Print the file name the next save of `base` would use.
    Filename {
        base: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::New {
            name,
            background,
            dir,
        } => {
            let mut board = Board::with_background(name, &background);
            if board.background() != background {
                eprintln!("warning: invalid background, using {BACKGROUND_DEFAULT}");
            }
            let path = board
                .try_save_in(&LocalFileSystem, &dir)
                .map_err(|err| err.to_string())?;
            println!("{}", path.display());
        }
        Command::Show { path, json } => {
            let board = Board::from_path(&path).map_err(|err| err.to_string())?;
            let summary = board.summary();
            if json {
                let text = serde_json::to_string_pretty(&summary).map_err(|err| err.to_string())?;
                println!("{text}");
            } else {
                println!("board {} \"{}\"", summary.id, summary.name);
                println!(
                    "background {} ({})",
                    summary.background,
                    summary.background_type.as_str()
                );
                for cardlist in &summary.cardlists {
                    println!(
                        "  {} \"{}\" items={}",
                        cardlist.id, cardlist.name, cardlist.items
                    );
                }
            }
        }
        Command::Classify { value } => {
            println!("{}", Board::background_type(&value).as_str());
        }
        Command::Filename { base, dir } => {
            println!("{}", new_filename_in(&LocalFileSystem, &dir, &base));
        }
        Command::Version => {
            println!("progress_core version={}", core_version());
        }
    }
    Ok(())
}
