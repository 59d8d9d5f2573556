use std::path::{Path, PathBuf};

use clap::Parser;

mod commands;
mod utils;

#[derive(Parser, Debug)]
#[command(
    name = "lazytodo",
    version,
    about = "A file-backed todo tracker for the command line"
)]
struct Args {
    /// Path of the SQLite file that holds the todo list
    #[arg(long = "db", env = "LAZYTODO_DB", default_value = "db/todo.db", global = true)]
    db: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging_best_effort(&args.db);

    args.command.execute(&args.db)?;
    Ok(())
}

/// Wires up file logging next to the database. A logging failure must never
/// take the command down with it, so errors only degrade to a stderr warning.
fn init_logging_best_effort(db_path: &Path) {
    let level = std::env::var("LAZYTODO_LOG")
        .unwrap_or_else(|_| lazytodo_core::default_log_level().to_string());
    let log_dir = std::env::var_os("LAZYTODO_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_log_dir(db_path));

    if let Err(message) = lazytodo_core::init_logging(&level, &log_dir) {
        eprintln!("warning: file logging disabled: {message}");
    }
}

fn default_log_dir(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join("logs")
}
