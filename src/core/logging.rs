use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::config::techscout_config_path;

/// Route `tracing` output to ~/.techscout/logs/techscout.log.
/// The TUI owns the terminal, so nothing is written to stdout/stderr.
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init() -> Result<()> {
    let dir = techscout_config_path("logs")?;
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("techscout.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
