//! Configuration module for the ADMS backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::db::DEFAULT_SOLDIER_LIST_LIMIT;
use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite document store file
    pub db_path: PathBuf,
    /// Optional JSON fixture imported at startup
    pub seed_path: Option<PathBuf>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Default number of soldiers returned by the list endpoint
    pub soldier_list_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let db_path = lookup("ADMS_DB_PATH")
            .unwrap_or_else(|| "./data/adms.sqlite".to_string())
            .into();

        let seed_path = lookup("ADMS_SEED_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let bind_addr = lookup("ADMS_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("Invalid ADMS_BIND_ADDR: {}", e)))?;

        let log_level = lookup("ADMS_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let soldier_list_limit = match lookup("ADMS_SOLDIER_LIST_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::Config(format!("Invalid ADMS_SOLDIER_LIST_LIMIT: {}", e))
            })?,
            None => DEFAULT_SOLDIER_LIST_LIMIT,
        };

        Ok(Self {
            db_path,
            seed_path,
            bind_addr,
            log_level,
            soldier_list_limit,
        })
    }
}
