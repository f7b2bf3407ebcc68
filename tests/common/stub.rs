//! Stub of the FACEIT Data API `players` endpoint.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Router, routing::get};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const API_KEY: &str = "integration-key";

/// A running profile API stub.
pub struct ProfileStub {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[derive(Clone)]
struct StubState {
    players: Arc<HashMap<String, String>>,
    hits: Arc<AtomicUsize>,
}

fn profile(id: &str, nickname: &str, country: &str, level: i64, elo: i64) -> (String, String) {
    (
        nickname.to_lowercase(),
        format!(
            r#"{{"player_id":"{id}","nickname":"{nickname}","avatar":"https://cdn.example/{id}.png",
               "country":"{country}","activated_at":"2016-03-01T09:30:00Z",
               "games":{{"cs2":{{"skill_level":{level},"faceit_elo":{elo}}}}}}}"#
        ),
    )
}

async fn players_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let expected = format!("Bearer {API_KEY}");
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return (StatusCode::UNAUTHORIZED, "{}".into());
    }
    let nickname = params.get("nickname").map(|n| n.to_lowercase());
    match nickname.and_then(|n| state.players.get(&n).cloned()) {
        Some(body) => (StatusCode::OK, body),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"errors":[{"message":"The resource was not found."}]}"#.into(),
        ),
    }
}

impl ProfileStub {
    /// Serve three known players on an ephemeral port.
    pub async fn spawn() -> anyhow::Result<Self> {
        let players: HashMap<_, _> = [
            profile("p-s1mple", "s1mple", "UA", 10, 3555),
            profile("p-zywoo", "ZywOo", "FR", 10, 3498),
            profile("p-niko", "NiKo", "BA", 10, 3402),
        ]
        .into_iter()
        .collect();
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            players: Arc::new(players),
            hits: Arc::clone(&hits),
        };

        let app = Router::new()
            .route("/data/v4/players", get(players_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, hits })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/data/v4", self.addr)
    }

    /// Number of lookups served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
