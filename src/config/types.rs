use sampledb_common::Variant;
use sampledb_db::pool::PoolOptions;
use sampledb_db::reports::ReportParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Schema the pipeline operates on.
    #[serde(default)]
    pub variant: Variant,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub seed: SeedConfig,

    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file, created on first use. `~` is expanded.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Maximum pooled connections (default: 1)
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds to wait for a connection (default: 5)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("sampledb.sqlite")
}

fn default_pool_size() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Database path with a leading `~` expanded.
    pub fn expanded_path(&self) -> String {
        let raw = self.path.to_string_lossy();
        shellexpand::tilde(raw.as_ref()).into_owned()
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.pool_size,
            connection_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Empty the variant's tables before inserting the seed batch
    #[serde(default)]
    pub reset: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportsConfig {
    /// Firm name used by `client-purchases`
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// Cinema name used by `cinema-screenings`
    #[serde(default = "default_cinema_name")]
    pub cinema_name: String,
}

fn default_client_name() -> String {
    ReportParams::default().client_name
}

fn default_cinema_name() -> String {
    ReportParams::default().cinema_name
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            cinema_name: default_cinema_name(),
        }
    }
}

impl From<&ReportsConfig> for ReportParams {
    fn from(config: &ReportsConfig) -> Self {
        Self {
            client_name: config.client_name.clone(),
            cinema_name: config.cinema_name.clone(),
        }
    }
}
