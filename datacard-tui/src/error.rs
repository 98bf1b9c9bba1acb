//! Console error type.

use std::path::PathBuf;

use datacard::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("table error: {0}")]
    Table(#[from] TableError),
}
