//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::{Config, StorageBackend};
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("faceit.api_key is required (or set FACEIT_API_KEY)")]
    MissingApiKey,
    #[error("faceit.base_url must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("faceit.game must not be empty")]
    MissingGame,
    #[error("faceit.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("storage.path is required for the sqlite backend")]
    MissingDatabasePath,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.faceit.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    let base_url = &config.faceit.base_url;
    match reqwest::Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(base_url.clone())),
    }

    if config.faceit.game.trim().is_empty() {
        errors.push(ValidationError::MissingGame);
    }
    if config.faceit.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    // Missing parent directories are created when the database opens.
    if config.storage.backend == StorageBackend::Sqlite && config.storage.path.trim().is_empty() {
        errors.push(ValidationError::MissingDatabasePath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn valid_config() -> Config {
        let mut config: Config = toml::from_str("").unwrap();
        config.faceit.api_key = ApiKey::new("key");
        config
    }

    #[test]
    fn defaults_with_key_are_valid() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config: Config = toml::from_str("").unwrap();
        config.faceit.base_url = "ftp://example.com".to_string();
        config.faceit.game = " ".to_string();
        config.faceit.timeout_secs = 0;
        config.storage.path = String::new();

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(matches!(errors[0], ValidationError::MissingApiKey));
        assert!(matches!(errors[1], ValidationError::InvalidBaseUrl(_)));
        assert!(matches!(errors[4], ValidationError::MissingDatabasePath));
    }

    #[test]
    fn missing_database_directory_is_accepted() {
        let mut config = valid_config();
        config.storage.path = "/definitely/not/here/tracker.db".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn memory_backend_ignores_database_path() {
        let mut config = valid_config();
        config.storage.backend = StorageBackend::Memory;
        config.storage.path = String::new();
        assert!(validate(&config).is_ok());
    }
}
