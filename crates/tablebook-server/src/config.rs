//! Server configuration from the environment
//!
//! `.env` files are honored through dotenvy. Booking rules (open date,
//! table count, group cap, catalogs) are fixed in the domain crate and
//! are not configurable here.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::adapters::{ServiceAccountKey, SheetsConfig, SheetsCredentials};

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_DATA_FILE: &str = "bookings.csv";

/// Which storage backend to run against
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Memory,
    File { path: PathBuf },
    Sheets(SheetsConfig),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub storage: StorageConfig,
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(optional_env)
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("TABLEBOOK_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .context("Invalid TABLEBOOK_BIND")?;

        let storage = match lookup("TABLEBOOK_STORAGE").as_deref().unwrap_or("memory") {
            "memory" => StorageConfig::Memory,
            "file" => StorageConfig::File {
                path: lookup("TABLEBOOK_DATA_FILE")
                    .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
                    .into(),
            },
            "sheets" => StorageConfig::Sheets(sheets_config(&lookup)?),
            other => bail!(
                "Unknown TABLEBOOK_STORAGE '{}' (expected memory, file or sheets)",
                other
            ),
        };

        Ok(Self { bind, storage })
    }
}

fn sheets_config(lookup: &impl Fn(&str) -> Option<String>) -> Result<SheetsConfig> {
    let spreadsheet_id = lookup("SHEETS_SPREADSHEET_ID")
        .context("SHEETS_SPREADSHEET_ID is required for sheets storage")?;

    let credentials = match (
        lookup("SHEETS_SERVICE_ACCOUNT_FILE"),
        lookup("SHEETS_ACCESS_TOKEN"),
    ) {
        (Some(path), _) => {
            let key = ServiceAccountKey::from_file(path.as_ref())?;
            SheetsCredentials::ServiceAccount(key)
        }
        (None, Some(token)) => SheetsCredentials::AccessToken(token),
        (None, None) => bail!(
            "SHEETS_SERVICE_ACCOUNT_FILE or SHEETS_ACCESS_TOKEN is required for sheets storage"
        ),
    };

    let mut config = SheetsConfig::new(spreadsheet_id, credentials);
    if let Some(range) = lookup("SHEETS_RANGE") {
        config = config.with_range(range);
    }
    if let Some(base_url) = lookup("SHEETS_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    Ok(config)
}
