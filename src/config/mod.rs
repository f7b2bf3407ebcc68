//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, BotConfig, HttpConfig, StorageConfig)
//! - [`faceit`]: Profile API configuration and the redacted API key type
//! - [`validation`]: Startup checks that report every problem at once

mod faceit;
mod types;
pub mod validation;

pub use faceit::{ApiKey, FaceitConfig};
pub use types::{BotConfig, Config, StorageBackend};
