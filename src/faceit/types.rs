//! Wire types for the FACEIT Data API `players` endpoint.

use crate::players::Player;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// Per-game ranking block (`games.<game>`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub skill_level: i64,
    #[serde(default)]
    pub faceit_elo: i64,
}

/// Response body of `GET /players?nickname=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub country: String,
    pub activated_at: DateTime<Utc>,
    #[serde(default)]
    pub games: HashMap<String, GameStats>,
}

impl PlayerProfile {
    /// Flatten into a registry record, keeping only the stats for `game`.
    ///
    /// Players who never played `game` get level and elo zero.
    pub fn into_player(self, game: &str, tracked_at: DateTime<Utc>) -> Player {
        let stats = self.games.get(game).copied().unwrap_or_default();
        Player {
            id: self.player_id,
            nickname: self.nickname,
            avatar_url: self.avatar,
            country_code: self.country,
            skill_level: stats.skill_level,
            elo: stats.faceit_elo,
            activated_at: self.activated_at,
            tracked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "player_id": "ac71ba3c-d3d4-45e7-8be2-26aa3986867d",
        "nickname": "s1mple",
        "avatar": "https://assets.faceit-cdn.net/avatars/s1mple.jpg",
        "country": "UA",
        "activated_at": "2014-04-22T15:46:35Z",
        "games": {
            "cs2": { "skill_level": 10, "faceit_elo": 3555, "region": "EU" },
            "csgo": { "skill_level": 10, "faceit_elo": 4012 }
        },
        "friends_ids": []
    }"#;

    #[test]
    fn picks_configured_game() {
        let profile: PlayerProfile = serde_json::from_str(BODY).unwrap();
        let player = profile.clone().into_player("cs2", Utc::now());
        assert_eq!(player.nickname, "s1mple");
        assert_eq!(player.country_code, "UA");
        assert_eq!(player.skill_level, 10);
        assert_eq!(player.elo, 3555);
        assert_eq!(player.activated_at.format("%Y-%m-%d").to_string(), "2014-04-22");

        let legacy = profile.into_player("csgo", Utc::now());
        assert_eq!(legacy.elo, 4012);
    }

    #[test]
    fn missing_game_block_defaults_to_zero() {
        let profile: PlayerProfile = serde_json::from_str(BODY).unwrap();
        let player = profile.into_player("dota2", Utc::now());
        assert_eq!(player.skill_level, 0);
        assert_eq!(player.elo, 0);
    }

    #[test]
    fn missing_player_id_is_rejected() {
        let body = r#"{ "nickname": "ghost", "activated_at": "2020-01-01T00:00:00Z" }"#;
        assert!(serde_json::from_str::<PlayerProfile>(body).is_err());
    }
}
