//! FACEIT profile lookups.
//!
//! The tracking service only sees the [`ProfileSource`] trait; the HTTP
//! implementation lives in [`client`].

mod client;
mod types;

pub use client::FaceitClient;

use crate::error::FaceitError;
use crate::players::Player;
use async_trait::async_trait;

/// Something that can resolve a nickname into a verified player profile.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_by_nickname(&self, nickname: &str) -> Result<Player, FaceitError>;
}
