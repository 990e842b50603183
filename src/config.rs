//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CHECKIN_DB_PATH` - SQLite file holding roster state (default: `checkin.db`)
//! - `CHECKIN_SYNC_URL` - Remote append endpoint; sync is disabled when unset
//! - `CHECKIN_REPORT_PATH` - Where `report` writes the workbook (default: `relatorio_final.xlsx`)

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    report::REPORT_FILE_NAME,
    sync::{HttpAppendEndpoint, SyncError},
};

const DEFAULT_DB_PATH: &str = "checkin.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Check-in desk configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file holding roster state.
    pub db_path: PathBuf,
    /// Remote append endpoint URL.
    pub sync_url: Option<String>,
    /// Default report output path.
    pub report_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            sync_url: None,
            report_path: PathBuf::from(REPORT_FILE_NAME),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if `CHECKIN_SYNC_URL` is set but is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let sync_url = lookup("CHECKIN_SYNC_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = &sync_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidEnvVar(
                    "CHECKIN_SYNC_URL".to_string(),
                    "must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(Self {
            db_path: lookup("CHECKIN_DB_PATH").map_or(defaults.db_path, PathBuf::from),
            sync_url,
            report_path: lookup("CHECKIN_REPORT_PATH").map_or(defaults.report_path, PathBuf::from),
        })
    }

    /// HTTP endpoint for remote sync.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotConfigured`] when no URL is set.
    pub fn sync_endpoint(&self) -> Result<HttpAppendEndpoint, SyncError> {
        self.sync_url
            .as_deref()
            .map(HttpAppendEndpoint::new)
            .ok_or(SyncError::NotConfigured)
    }
}
