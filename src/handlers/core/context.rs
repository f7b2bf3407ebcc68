//! Command handler context and core types.

use super::registry::Registry;
use crate::error::TrackError;
use crate::services::TrackingService;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One inbound command invocation from the chat transport.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    /// Command name, with or without a leading `/`.
    pub command: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Invoking user, for logging only.
    #[serde(default)]
    pub user: Option<String>,
    /// When the transport created the interaction. Defaults to receipt time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            command: command.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            user: None,
            created_at: Utc::now(),
        }
    }
}

/// The single response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub content: String,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The player registry.
    pub tracker: &'a TrackingService,
    /// The interaction being answered.
    pub interaction: &'a Interaction,
    /// Command registry (for HELP).
    pub registry: &'a Registry,
}

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters, usage: {0}")]
    NeedMoreParams(&'static str),

    #[error("not a nickname or profile link: {0}")]
    InvalidPlayer(String),

    #[error("{player}: {source}")]
    Player {
        player: String,
        #[source]
        source: TrackError,
    },

    #[error(transparent)]
    Track(#[from] TrackError),
}

impl HandlerError {
    pub fn player(player: impl Into<String>, source: TrackError) -> Self {
        Self::Player {
            player: player.into(),
            source,
        }
    }

    /// Get a static error code string for metrics labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams(_) => "need_more_params",
            Self::InvalidPlayer(_) => "invalid_player",
            Self::Player { source, .. } | Self::Track(source) => source.error_code(),
        }
    }

    /// Whether this failure points at our side rather than the user's input
    /// or the remote service.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Player {
                source: TrackError::Storage(_),
                ..
            } | Self::Track(TrackError::Storage(_))
        )
    }

    /// Render the error as the reply shown to the user.
    pub fn to_reply(&self) -> Reply {
        let text = match self {
            Self::NeedMoreParams(usage) => format!("Missing player. Usage: `{usage}`"),
            Self::InvalidPlayer(arg) => {
                format!("`{arg}` is not a FACEIT nickname or profile link.")
            }
            Self::Player { player, source } => describe(source, player),
            Self::Track(source) => describe(source, "that player"),
        };
        Reply::new(text)
    }
}

fn describe(err: &TrackError, player: &str) -> String {
    match err {
        TrackError::NotFound(_) => format!("{player} is not being tracked."),
        TrackError::EmptyNickname => "Please provide a player nickname.".to_string(),
        TrackError::RemoteApi { status: 404, .. } => {
            format!("Could not find a FACEIT player named {player}.")
        }
        TrackError::RemoteApi { status, .. } => {
            format!("FACEIT rejected the lookup for {player} (HTTP {status}).")
        }
        TrackError::Decode(_) => format!("FACEIT returned an unreadable profile for {player}."),
        TrackError::Transport(_) => {
            "Could not reach FACEIT right now. Please try again later.".to_string()
        }
        TrackError::Storage(_) => "Something went wrong on our side. Please try again later.".to_string(),
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<Reply, HandlerError>;

/// A named bot command.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Invocation syntax, e.g. `/track <player>`.
    fn usage(&self) -> &'static str;

    /// One-line description for HELP.
    fn description(&self) -> &'static str;

    async fn handle(&self, ctx: &Context<'_>, args: &[String]) -> HandlerResult;
}
