//! File logging bootstrap shared by every binary entry point.
//!
//! # Responsibility
//! - Start rolling file logs at most once per process.
//! - Keep later init calls with the same configuration harmless.
//!
//! # Invariants
//! - Reconfiguring level or directory after a successful init is an error.
//! - Initialization never panics; failures surface as readable strings.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "lazytodo";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

static ACTIVE: OnceCell<FileLogging> = OnceCell::new();

struct FileLogging {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging, or verifies it is already running with the same
/// configuration.
///
/// Writes are unbuffered: a CLI process performs one operation and exits,
/// and buffered records would be lost because the handle is never dropped.
///
/// # Errors
/// - Unknown `level` names.
/// - A `log_dir` that cannot be created.
/// - A second call asking for a different level or directory.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let level = normalize_level(level)?;

    let active = ACTIVE.get_or_try_init(|| -> Result<FileLogging, String> {
        let handle = start_file_logger(level, log_dir)?;
        info!(
            "event=logging_init module=core status=ok level={level} log_dir={} version={}",
            log_dir.display(),
            env!("CARGO_PKG_VERSION")
        );
        Ok(FileLogging {
            level,
            dir: log_dir.to_path_buf(),
            _handle: handle,
        })
    })?;

    if active.level != level {
        return Err(format!(
            "logging already runs at level `{}`, requested `{level}`",
            active.level
        ));
    }
    if active.dir != log_dir {
        return Err(format!(
            "logging already writes to `{}`, requested `{}`",
            active.dir.display(),
            log_dir.display()
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// Default log level for the current build mode: `debug` in debug builds,
/// `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_file_logger(level: &'static str, log_dir: &Path) -> Result<LoggerHandle, String> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "cannot create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    const SUPPORTED: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

    let mut wanted = level.trim().to_ascii_lowercase();
    if wanted == "warning" {
        wanted = "warn".to_string();
    }

    SUPPORTED
        .iter()
        .copied()
        .find(|name| *name == wanted)
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; use one of {}",
                level.trim(),
                SUPPORTED.join("|")
            )
        })
}
