//! tracing subscriber setup.

use std::{fs, path::PathBuf};

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use weather_core::Config;

const DEFAULT_FILTER: &str = "info,hyper_util=warn,reqwest=warn,hyper=warn";

/// Log to a file while the dashboard owns the terminal. Returns the log path.
pub fn init_file() -> anyhow::Result<PathBuf> {
    let data_dir = Config::project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let log_path = data_dir.join("weather.log");
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_ansi(false)
        .init();

    Ok(log_path)
}

/// Log warnings to stderr for one-shot commands.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter("warn"))
        .init();
}

/// `RUST_LOG` wins over the built-in default.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
