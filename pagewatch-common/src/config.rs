//! Configuration resolution for PageWatch
//!
//! Resolution priority for every setting:
//! 1. Command-line argument (where one exists)
//! 2. Environment variable (`PAGEWATCH_*`)
//! 3. TOML config file (`~/.config/pagewatch/config.toml`)
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_DATABASE_PATH: &str = "storage/pagewatch.sqlite";

/// Retry tunables for the scoring API
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpeedConfig {
    /// API key for PageSpeed Insights (empty = keyless quota)
    #[serde(default)]
    pub api_key: String,

    /// Maximum rate-limit retries per audit
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Backoff ceiling in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SQLite database file path
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Scoring API settings
    #[serde(default)]
    pub pagespeed: PageSpeedConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            pagespeed: PageSpeedConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with env > TOML > default priority
    ///
    /// `cli_db_path` overrides the database path when provided.
    pub fn load(cli_db_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                let parsed: Config = toml::from_str(&content)
                    .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
                info!("Loaded config file: {}", path.display());
                parsed
            }
            _ => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        // Environment overrides
        if let Ok(path) = std::env::var("PAGEWATCH_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("PAGEWATCH_PAGESPEED_API_KEY") {
            config.pagespeed.api_key = key;
        }

        // CLI argument wins
        if let Some(path) = cli_db_path {
            config.database_path = path.to_path_buf();
        }

        Ok(config)
    }
}

/// Config file location: `~/.config/pagewatch/config.toml`,
/// falling back to `/etc/pagewatch/config.toml` on Linux
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("pagewatch").join("config.toml"));

    if let Some(path) = &user_config {
        if path.exists() {
            return user_config;
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/pagewatch/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    user_config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.pagespeed.max_retries, 3);
        assert_eq!(config.pagespeed.base_delay_ms, 1000);
        assert_eq!(config.pagespeed.max_delay_ms, 30000);
        assert!(config.pagespeed.api_key.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            database_path = "/var/lib/pagewatch/db.sqlite"

            [pagespeed]
            api_key = "test-key"
            max_retries = 5
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/pagewatch/db.sqlite"));
        assert_eq!(config.pagespeed.api_key, "test-key");
        assert_eq!(config.pagespeed.max_retries, 5);
        // Unspecified tunables fall back to defaults
        assert_eq!(config.pagespeed.base_delay_ms, 1000);
    }

    #[test]
    fn test_cli_override() {
        let config = Config::load(Some(Path::new("/tmp/cli-override.sqlite"))).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/cli-override.sqlite"));
    }
}
