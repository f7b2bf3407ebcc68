//! Unified error handling for faceit-tracker.
//!
//! Each layer returns its own typed error: the repositories return
//! [`RepoError`], the profile client returns [`FaceitError`], and the tracking
//! service folds both into [`TrackError`]. Only the command handlers turn
//! these into human text.

use thiserror::Error;

// ============================================================================
// Repository Errors
// ============================================================================

/// Errors returned by a [`crate::players::PlayerRepository`] backend.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("player not found: {0}")]
    NotFound(String),

    #[error("player already tracked: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Storage(err.to_string())
    }
}

// ============================================================================
// Profile API Errors
// ============================================================================

/// Errors returned by the remote profile client.
#[derive(Debug, Error)]
pub enum FaceitError {
    /// The API answered with a non-success status. Not worth retrying.
    #[error("profile API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout, reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body was not a valid player document.
    #[error("malformed profile response: {error}")]
    Decode { error: String, body: String },

    #[error("invalid profile API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl FaceitError {
    /// Whether the failure is transient and the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Decode { .. } | Self::InvalidBaseUrl(_) => false,
        }
    }
}

// ============================================================================
// Tracking Errors
// ============================================================================

/// Errors surfaced by [`crate::services::TrackingService`].
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("{0} is not being tracked")]
    NotFound(String),

    #[error("profile API rejected lookup ({status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("could not reach profile API: {0}")]
    Transport(String),

    #[error("could not decode profile: {0}")]
    Decode(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("no player name given")]
    EmptyNickname,
}

impl TrackError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::RemoteApi { .. } => "remote_api",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::Storage(_) => "storage",
            Self::EmptyNickname => "empty_nickname",
        }
    }
}

impl From<FaceitError> for TrackError {
    fn from(err: FaceitError) -> Self {
        match err {
            FaceitError::Api { status, body } => TrackError::RemoteApi { status, body },
            FaceitError::Transport(e) => TrackError::Transport(e.to_string()),
            FaceitError::Decode { error, .. } => TrackError::Decode(error),
            FaceitError::InvalidBaseUrl(url) => TrackError::Transport(url),
        }
    }
}

impl From<RepoError> for TrackError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(nick) => TrackError::NotFound(nick),
            // Conflicts are resolved by the service; one leaking out is a storage fault.
            RepoError::Conflict(nick) => {
                TrackError::Storage(format!("unresolved conflict for {nick}"))
            }
            RepoError::Storage(msg) => TrackError::Storage(msg),
        }
    }
}
