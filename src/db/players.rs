//! SQLite-backed player repository.
//!
//! Uniqueness is enforced by the schema: `id` is the primary key and
//! `nickname_key` (the normalized nickname) carries a UNIQUE constraint.
//! Timestamps are stored as integer epoch seconds.

use crate::error::RepoError;
use crate::players::{Player, PlayerRepository, normalize_nickname};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

type PlayerRow = (String, String, String, String, i64, i64, i64, i64);

const SELECT_COLUMNS: &str = r#"
    SELECT id, nickname, avatar_url, country_code, skill_level, elo, activated_at, tracked_at
    FROM players
"#;

/// Repository for tracked players stored in SQLite.
#[derive(Clone)]
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    /// Create a new player repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn from_row(row: PlayerRow) -> Player {
    let (id, nickname, avatar_url, country_code, skill_level, elo, activated_at, tracked_at) = row;
    Player {
        id,
        nickname,
        avatar_url,
        country_code,
        skill_level,
        elo,
        activated_at: from_epoch(activated_at),
        tracked_at: from_epoch(tracked_at),
    }
}

fn from_epoch(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn create(&self, player: Player) -> Result<Player, RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players
                (id, nickname, nickname_key, avatar_url, country_code, skill_level, elo, activated_at, tracked_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&player.id)
        .bind(&player.nickname)
        .bind(player.nickname_key())
        .bind(&player.avatar_url)
        .bind(&player.country_code)
        .bind(player.skill_level)
        .bind(player.elo)
        .bind(player.activated_at.timestamp())
        .bind(player.tracked_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepoError::Conflict(player.nickname.clone());
            }
            RepoError::from(e)
        })?;

        Ok(player)
    }

    async fn find_all(&self) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query_as::<_, PlayerRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Player, RepoError> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ?");
        sqlx::query_as::<_, PlayerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(from_row)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Player, RepoError> {
        let query = format!("{SELECT_COLUMNS} WHERE nickname_key = ?");
        sqlx::query_as::<_, PlayerRow>(&query)
            .bind(normalize_nickname(nickname))
            .fetch_optional(&self.pool)
            .await?
            .map(from_row)
            .ok_or_else(|| RepoError::NotFound(nickname.to_string()))
    }

    async fn remove(&self, id: &str) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
