mod action;
mod api;
mod app;
mod columns;
mod config;
mod error;
mod farm;
mod paths;
mod terminal;

use std::fs::{self, File};
use std::process::ExitCode;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::AppConfig;

/// Log to `<cache_dir>/latest.log`, archiving the previous run's log.
fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app::run(config).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
