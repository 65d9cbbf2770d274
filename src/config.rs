//! Runtime configuration for the command-line front end.
//!
//! Everything comes from flags (with environment fallbacks handled by clap);
//! this module only fills in platform defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the ledger blob
    pub data_dir: PathBuf,
    /// Log level handed to the logger unless `RUST_LOG` is set
    pub log_level: &'static str,
}

impl Config {
    pub fn resolve(data_dir: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            log_level: if verbose { "info" } else { "warn" },
        })
    }
}

/// Per-user data directory, e.g. `~/.local/share/tally` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "tally", "tally")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
