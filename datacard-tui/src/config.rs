//! Console configuration, read from `config.json` in the config directory.

use std::fs;
use std::path::Path;
use std::time::Duration;

use datacard::render::DEFAULT_PX_PER_CELL;
use datacard::TableConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub table: TableConfig,
    /// Logical pixels per terminal column.
    pub px_per_cell: f32,
    /// Simulated round trip of the voucher ledger.
    pub api_latency_ms: u64,
    /// Size of the generated flock register and voucher ledger.
    pub record_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            px_per_cell: DEFAULT_PX_PER_CELL,
            api_latency_ms: 350,
            record_count: 137,
        }
    }
}

impl AppConfig {
    /// Load from the platform config directory; defaults when there is none.
    pub fn load() -> Result<Self, AppError> {
        match paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.table.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn api_latency(&self) -> Duration {
        Duration::from_millis(self.api_latency_ms)
    }
}
