//! HTTP client for the FACEIT Data API.
//!
//! Every request carries the bearer credential and asks for JSON. Status
//! handling:
//! - 2xx: body decoded as [`PlayerProfile`]; a bad body is `Decode`
//! - anything else: `Api` with the raw body, never parsed
//! - no response at all (connect failure, timeout): `Transport`

use super::ProfileSource;
use super::types::PlayerProfile;
use crate::config::{ApiKey, FaceitConfig};
use crate::error::FaceitError;
use crate::players::Player;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};

/// Authenticated client for profile lookups.
pub struct FaceitClient {
    players_url: Url,
    api_key: ApiKey,
    game: String,
    http_client: reqwest::Client,
}

impl FaceitClient {
    /// Build a client from configuration.
    ///
    /// The configured timeout bounds the whole request, body included.
    pub fn new(config: &FaceitConfig) -> Result<Self, FaceitError> {
        let players_url = Url::parse(&format!(
            "{}/players",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|e| FaceitError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("faceit-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            players_url,
            api_key: config.api_key.clone(),
            game: config.game.clone(),
            http_client,
        })
    }

    fn lookup_url(&self, nickname: &str) -> Url {
        let mut url = self.players_url.clone();
        url.query_pairs_mut().append_pair("nickname", nickname);
        url
    }
}

#[async_trait]
impl ProfileSource for FaceitClient {
    async fn fetch_by_nickname(&self, nickname: &str) -> Result<Player, FaceitError> {
        let url = self.lookup_url(nickname);
        debug!(nickname = %nickname, "Fetching profile");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(self.api_key.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| warn!(nickname = %nickname, error = %e, "Profile API request failed"))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(nickname = %nickname, status = status.as_u16(), "Profile API returned error");
            return Err(FaceitError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let profile: PlayerProfile = serde_json::from_str(&body).map_err(|e| {
            warn!(nickname = %nickname, error = %e, body = %body, "Failed to decode profile response");
            FaceitError::Decode {
                error: e.to_string(),
                body: body.clone(),
            }
        })?;

        Ok(profile.into_player(&self.game, chrono::Utc::now()))
    }
}
