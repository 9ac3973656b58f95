//! Trek configuration.
//!
//! Loaded from `~/.trek/config.toml`. Every field is optional and the
//! file itself may be absent; defaults cover the rest.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Trek configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Where probe records are stored. Defaults to `~/.trek/probes/`.
    pub storage_root: Option<PathBuf>,

    /// Log filter when the `TREK_LOG` env var is unset. Defaults to `info`.
    pub log_filter: Option<String>,
}

impl Config {
    /// Load config from `~/.trek/config.toml`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file
    /// is an error.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.trek/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".trek").join("config.toml"))
    }
}
