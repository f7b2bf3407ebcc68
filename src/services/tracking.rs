//! Player tracking service.
//!
//! Owns the repository and the profile source, both injected at
//! construction. Locking discipline:
//! - Registry reads and writes go through the repository, which holds its
//!   own lock (or transaction) only for the duration of a single call.
//! - `track` and `untrack` serialize per normalized nickname through an
//!   async gate, so concurrent `track("niko")` calls perform a single
//!   remote fetch and a single insert. Different nicknames never contend.
//! - The remote fetch happens while holding only that nickname's gate,
//!   never a registry lock.

use crate::error::{FaceitError, RepoError, TrackError};
use crate::faceit::ProfileSource;
use crate::players::{Player, PlayerRepository, normalize_nickname};
use crate::telemetry::spans;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{Instrument, debug, info, warn};

/// Outcome of a successful `track`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tracked {
    /// The player was fetched and added to the registry by this call.
    New(Player),
    /// The player was already tracked; no remote call was made.
    Existing(Player),
}

impl Tracked {
    pub fn player(&self) -> &Player {
        match self {
            Self::New(p) | Self::Existing(p) => p,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// Registry of tracked players backed by a repository and a profile source.
pub struct TrackingService {
    repo: Arc<dyn PlayerRepository>,
    profiles: Arc<dyn ProfileSource>,
    /// Per-nickname gates for in-flight mutations.
    gates: DashMap<String, Arc<Mutex<()>>>,
}

impl TrackingService {
    pub fn new(repo: Arc<dyn PlayerRepository>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self {
            repo,
            profiles,
            gates: DashMap::new(),
        }
    }

    /// Start tracking `nickname`, fetching its profile on first sight.
    ///
    /// Idempotent: a nickname that is already tracked (in any letter case)
    /// returns the stored record without contacting the profile API.
    pub async fn track(&self, nickname: &str) -> Result<Tracked, TrackError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(TrackError::EmptyNickname);
        }
        let key = normalize_nickname(nickname);

        self.track_keyed(nickname, &key)
            .instrument(spans::tracking("track", nickname))
            .await
    }

    /// Stop tracking `nickname`, returning the removed record.
    pub async fn untrack(&self, nickname: &str) -> Result<Player, TrackError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(TrackError::EmptyNickname);
        }
        let key = normalize_nickname(nickname);

        self.untrack_keyed(nickname, &key)
            .instrument(spans::tracking("untrack", nickname))
            .await
    }

    /// Every tracked player, in no particular order.
    pub async fn list(&self) -> Result<Vec<Player>, TrackError> {
        Ok(self.repo.find_all().await?)
    }

    /// Whether `nickname` is tracked. Never contacts the profile API.
    pub async fn is_tracked(&self, nickname: &str) -> Result<bool, TrackError> {
        Ok(self.lookup(&normalize_nickname(nickname)).await?.is_some())
    }

    async fn track_keyed(&self, nickname: &str, key: &str) -> Result<Tracked, TrackError> {
        if let Some(player) = self.lookup(key).await? {
            debug!("Already tracked");
            return Ok(Tracked::Existing(player));
        }

        let gate = self.gate(key);
        let _held = gate.lock().await;
        self.track_gated(nickname, key).await
    }

    async fn track_gated(&self, nickname: &str, key: &str) -> Result<Tracked, TrackError> {
        // Another caller may have finished while we waited on the gate.
        if let Some(player) = self.lookup(key).await? {
            return Ok(Tracked::Existing(player));
        }

        let fetched = match self.profiles.fetch_by_nickname(nickname).await {
            Ok(player) => {
                crate::metrics::record_remote_lookup("ok");
                player
            }
            Err(e) => {
                crate::metrics::record_remote_lookup(lookup_outcome(&e));
                debug!(error = %e, retryable = e.is_retryable(), "Profile lookup failed");
                return Err(e.into());
            }
        };

        match self.repo.create(fetched.clone()).await {
            Ok(player) => {
                crate::metrics::inc_tracked_players();
                info!(id = %player.id, elo = player.elo, "Player tracked");
                Ok(Tracked::New(player))
            }
            Err(RepoError::Conflict(_)) => self.resolve_conflict(&fetched).await,
            Err(e) => Err(e.into()),
        }
    }

    /// The profile API can return a nickname whose key differs from what
    /// the user typed, or an id we already hold under an older nickname.
    /// Either way the stored record wins.
    async fn resolve_conflict(&self, fetched: &Player) -> Result<Tracked, TrackError> {
        match self.repo.find_by_nickname(&fetched.nickname).await {
            Ok(existing) => return Ok(Tracked::Existing(existing)),
            Err(RepoError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        match self.repo.find_by_id(&fetched.id).await {
            Ok(existing) => {
                warn!(
                    id = %existing.id,
                    stored = %existing.nickname,
                    remote = %fetched.nickname,
                    "Profile already tracked under another nickname"
                );
                Ok(Tracked::Existing(existing))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn untrack_keyed(&self, nickname: &str, key: &str) -> Result<Player, TrackError> {
        let gate = self.gate(key);
        let _held = gate.lock().await;
        self.untrack_gated(nickname, key).await
    }

    async fn untrack_gated(&self, nickname: &str, key: &str) -> Result<Player, TrackError> {
        let player = self
            .lookup(key)
            .await?
            .ok_or_else(|| TrackError::NotFound(nickname.to_string()))?;

        match self.repo.remove(&player.id).await {
            Ok(()) => {
                crate::metrics::dec_tracked_players();
                info!(id = %player.id, "Player untracked");
                Ok(player)
            }
            Err(RepoError::NotFound(_)) => Err(TrackError::NotFound(nickname.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn lookup(&self, key: &str) -> Result<Option<Player>, RepoError> {
        match self.repo.find_by_nickname(key).await {
            Ok(player) => Ok(Some(player)),
            Err(RepoError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn gate(&self, key: &str) -> Gate<'_> {
        let mutex = self.gates.entry(key.to_string()).or_default().clone();
        Gate {
            gates: &self.gates,
            key: key.to_string(),
            mutex,
        }
    }
}

/// A claim on one nickname's gate.
///
/// Dropping it, whether the operation finished or its future was cancelled,
/// removes the map entry once no other caller holds or waits on it.
struct Gate<'a> {
    gates: &'a DashMap<String, Arc<Mutex<()>>>,
    key: String,
    mutex: Arc<Mutex<()>>,
}

impl Gate<'_> {
    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock().await
    }
}

impl Drop for Gate<'_> {
    fn drop(&mut self) {
        // One reference in the map, one here.
        self.gates
            .remove_if(&self.key, |_, g| Arc::strong_count(g) <= 2);
    }
}

fn lookup_outcome(err: &FaceitError) -> &'static str {
    match err {
        FaceitError::Api { .. } => "remote_api",
        FaceitError::Transport(_) | FaceitError::InvalidBaseUrl(_) => "transport",
        FaceitError::Decode { .. } => "decode",
    }
}
