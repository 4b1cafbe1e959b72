// src/util/log.rs

//! Logging setup. The terminal belongs to the UI, so interactive sessions
//! log to a file; headless commands log to stderr.
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "wordcloud-studio.log";

/// `RUST_LOG` if set, otherwise `debug` when `DEBUG=true`, else `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let debug_enabled = std::env::var("DEBUG").unwrap_or_default() == "true";
        EnvFilter::new(if debug_enabled { "debug" } else { "info" })
    })
}

/// Send logs to `<log_dir>/wordcloud-studio.log`, truncated on start.
pub fn init_file(log_dir: &Path) -> std::io::Result<PathBuf> {
    create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;

    // A subscriber may already be installed (tests, repeated init).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(path)
}

pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
