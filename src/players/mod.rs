//! Tracked player model and the repository abstraction.
//!
//! Two interchangeable backends implement [`PlayerRepository`]:
//! - [`MemoryRepository`]: process-local map behind a read-write lock
//! - [`crate::db::SqlitePlayerRepository`]: durable SQLite table
//!
//! Both enforce one record per normalized nickname and reject duplicates
//! with [`RepoError::Conflict`].

mod memory;

pub use memory::MemoryRepository;

use crate::error::RepoError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A tracked player profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Identifier assigned by the profile service.
    pub id: String,
    /// Display nickname, as returned by the profile service.
    pub nickname: String,
    pub avatar_url: String,
    /// ISO country code, lowercase as delivered.
    pub country_code: String,
    pub skill_level: i64,
    pub elo: i64,
    /// When the account was created on the profile service.
    pub activated_at: DateTime<Utc>,
    /// When this record entered the registry.
    pub tracked_at: DateTime<Utc>,
}

impl Player {
    /// The key this player is indexed under.
    pub fn nickname_key(&self) -> String {
        normalize_nickname(&self.nickname)
    }
}

/// Case-fold a nickname into its registry key.
pub fn normalize_nickname(nickname: &str) -> String {
    nickname.trim().to_lowercase()
}

/// Persistence capability for tracked players.
///
/// Ordering of [`find_all`](Self::find_all) is unspecified; sorting is done
/// by whoever renders the list.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Insert a new player. Fails with `Conflict` if the id or normalized
    /// nickname is already present.
    async fn create(&self, player: Player) -> Result<Player, RepoError>;

    /// Every tracked player.
    async fn find_all(&self) -> Result<Vec<Player>, RepoError>;

    async fn find_by_id(&self, id: &str) -> Result<Player, RepoError>;

    /// Case-insensitive lookup.
    async fn find_by_nickname(&self, nickname: &str) -> Result<Player, RepoError>;

    async fn remove(&self, id: &str) -> Result<(), RepoError>;
}
