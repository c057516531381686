//! Application configuration management.
//!
//! Stores the preferred sort order and the roster file location used for
//! import and export. Configuration lives at `~/.config/caseload/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caseload_core::{SortDirection, SortField, SortState};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "caseload";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default roster file name for import/export
const ROSTER_FILE: &str = "roster.json";

/// Environment variable overriding the roster path
pub const ROSTER_PATH_ENV: &str = "CASELOAD_ROSTER";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_sort: SortField,
    pub default_direction: SortDirection,
    pub roster_path: Option<PathBuf>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Ok(serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config {}", path.display()))?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the default roster file.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Roster file: `CASELOAD_ROSTER`, then the configured path, then the
    /// default under the data directory.
    pub fn resolved_roster_path(&self) -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(ROSTER_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(ref path) = self.roster_path {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join(ROSTER_FILE))
    }

    pub fn sort_state(&self) -> SortState {
        SortState::new(self.default_sort, self.default_direction)
    }

    /// Remember `sort` as the default. Returns true if anything changed.
    pub fn remember_sort(&mut self, sort: SortState) -> bool {
        if self.sort_state() == sort {
            return false;
        }
        self.default_sort = sort.field;
        self.default_direction = sort.direction;
        true
    }
}
