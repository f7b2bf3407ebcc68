//! LIST handler.

use super::core::{Context, Handler, HandlerResult, Reply};
use crate::players::Player;
use async_trait::async_trait;

pub struct ListHandler;

#[async_trait]
impl Handler for ListHandler {
    fn usage(&self) -> &'static str {
        "/list"
    }

    fn description(&self) -> &'static str {
        "List tracked players by elo."
    }

    async fn handle(&self, ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
        let players = ctx.tracker.list().await?;
        if players.is_empty() {
            return Ok(Reply::new("No players are currently being tracked!"));
        }
        Ok(Reply::new(leaderboard(players)))
    }
}

/// Rank by elo, highest first. Equal elo falls back to nickname so the
/// output is stable.
fn leaderboard(mut players: Vec<Player>) -> String {
    players.sort_by(|a, b| {
        b.elo
            .cmp(&a.elo)
            .then_with(|| a.nickname_key().cmp(&b.nickname_key()))
    });
    players
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {} - {}", i + 1, p.nickname, p.elo))
        .collect::<Vec<_>>()
        .join("\n")
}
