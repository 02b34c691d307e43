//! File logging.
//!
//! The terminal belongs to the UI, so log records go to `lumen.log` in the
//! platform data directory. The filter comes from `RUST_LOG`, defaulting to
//! `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use env_logger::{Env, Target};

const LOG_FILE: &str = "lumen.log";

/// Install the global logger. Returns the log file path, or `None` when the
/// platform has no data directory and logging stays off.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "lumen") else {
        return Ok(None);
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(Some(path))
}
