//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::faceit::{ApiKey, FaceitConfig};

/// Environment variable that overrides `faceit.api_key`.
pub const API_KEY_ENV: &str = "FACEIT_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity and dispatch behaviour.
    #[serde(default)]
    pub bot: BotConfig,
    /// Profile API access.
    #[serde(default)]
    pub faceit: FaceitConfig,
    /// HTTP surface (interactions, health, metrics).
    #[serde(default)]
    pub http: HttpConfig,
    /// Where tracked players are kept.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.faceit.api_key = ApiKey::new(key);
        }
    }
}

/// Bot identity and dispatch behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Name used in logs and the help text (default: "faceit-tracker").
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Answer unrecognized commands with an explicit message instead of
    /// ignoring them (default: false).
    #[serde(default)]
    pub reply_unknown_commands: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            reply_unknown_commands: false,
        }
    }
}

fn default_bot_name() -> String {
    "faceit-tracker".to_string()
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to (default: "0.0.0.0:8080").
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Serve Prometheus metrics on `/metrics` (default: true).
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics: true,
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

pub(super) fn default_true() -> bool {
    true
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable SQLite file.
    #[default]
    Sqlite,
    /// Process-local map, lost on restart.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Path to the SQLite database file (default: "tracker.db").
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "tracker.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[faceit]
api_key = "abc"
"#,
        )
        .unwrap();
        assert_eq!(config.bot.name, "faceit-tracker");
        assert!(!config.bot.reply_unknown_commands);
        assert_eq!(config.faceit.base_url, "https://open.faceit.com/data/v4");
        assert_eq!(config.faceit.game, "cs2");
        assert_eq!(config.faceit.timeout_secs, 10);
        assert_eq!(config.http.listen.port(), 8080);
        assert!(config.http.metrics);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.path, "tracker.db");
    }

    #[test]
    fn full_config_parses() {
        let config: Config = toml::from_str(
            r#"
[bot]
name = "elo-bot"
reply_unknown_commands = true

[faceit]
api_key = "abc"
base_url = "http://127.0.0.1:9000/data/v4"
game = "csgo"
timeout_secs = 3

[http]
listen = "127.0.0.1:18080"
metrics = false

[storage]
backend = "memory"
"#,
        )
        .unwrap();
        assert_eq!(config.bot.name, "elo-bot");
        assert!(config.bot.reply_unknown_commands);
        assert_eq!(config.faceit.api_key.as_str(), "abc");
        assert_eq!(config.faceit.game, "csgo");
        assert_eq!(config.faceit.timeout_secs, 3);
        assert!(!config.http.metrics);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str(
            r#"
[storage]
backend = "postgres"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bot]\nname = \"from-file\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.bot.name, "from-file");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/faceit-tracker.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
