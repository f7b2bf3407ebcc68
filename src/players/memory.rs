//! In-memory player repository.
//!
//! Players are stored by id with a secondary index from normalized nickname
//! to id. Both maps live behind a single `RwLock` so the index can never
//! disagree with the primary map. The lock is never held across an await.

use super::{Player, PlayerRepository, normalize_nickname};
use crate::error::RepoError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct Index {
    by_id: HashMap<String, Player>,
    by_nickname: HashMap<String, String>,
}

/// Process-local repository, lost on restart.
#[derive(Default)]
pub struct MemoryRepository {
    inner: RwLock<Index>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for MemoryRepository {
    async fn create(&self, player: Player) -> Result<Player, RepoError> {
        let key = player.nickname_key();
        let mut index = self.inner.write();

        if index.by_nickname.contains_key(&key) || index.by_id.contains_key(&player.id) {
            return Err(RepoError::Conflict(player.nickname));
        }

        index.by_nickname.insert(key, player.id.clone());
        index.by_id.insert(player.id.clone(), player.clone());
        Ok(player)
    }

    async fn find_all(&self) -> Result<Vec<Player>, RepoError> {
        Ok(self.inner.read().by_id.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Player, RepoError> {
        self.inner
            .read()
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Player, RepoError> {
        let key = normalize_nickname(nickname);
        let index = self.inner.read();
        index
            .by_nickname
            .get(&key)
            .and_then(|id| index.by_id.get(id))
            .cloned()
            .ok_or_else(|| RepoError::NotFound(nickname.to_string()))
    }

    async fn remove(&self, id: &str) -> Result<(), RepoError> {
        let mut index = self.inner.write();
        let player = index
            .by_id
            .remove(id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        index.by_nickname.remove(&player.nickname_key());
        Ok(())
    }
}
