//! Profile API configuration.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer credential for the profile API.
///
/// Zeroized when dropped and never printed by `Debug`.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey").field("len", &self.0.len()).finish()
    }
}

/// FACEIT Data API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceitConfig {
    /// Server-side API key. `FACEIT_API_KEY` overrides this value.
    #[serde(default)]
    pub api_key: ApiKey,
    /// Base URL of the Data API (default: "https://open.faceit.com/data/v4").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Key of the per-game block that carries level and elo (default: "cs2").
    #[serde(default = "default_game")]
    pub game: String,
    /// Upper bound on a single profile lookup, in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FaceitConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            base_url: default_base_url(),
            game: default_game(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://open.faceit.com/data/v4".to_string()
}

fn default_game() -> String {
    "cs2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}
