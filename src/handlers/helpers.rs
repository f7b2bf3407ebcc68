//! Helpers shared by the player commands.

use super::core::HandlerError;
use crate::players::Player;

/// Extract a nickname from a command argument.
///
/// Accepts a bare nickname or a profile link such as
/// `https://www.faceit.com/en/players/s1mple/stats/cs2`.
pub fn parse_player_arg(arg: &str) -> Result<String, HandlerError> {
    let arg = arg.trim();
    if !arg.contains("faceit.com/") {
        if arg.chars().any(char::is_whitespace) {
            return Err(HandlerError::InvalidPlayer(arg.to_string()));
        }
        return Ok(arg.to_string());
    }

    let path = arg.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments
        .by_ref()
        .find(|s| *s == "players")
        .and_then(|_| segments.next())
        .map(str::to_string)
        .ok_or_else(|| HandlerError::InvalidPlayer(arg.to_string()))
}

/// First argument as a nickname, or the usage error.
pub fn required_player(args: &[String], usage: &'static str) -> Result<String, HandlerError> {
    match args.first().map(|a| a.trim()) {
        Some(arg) if !arg.is_empty() => parse_player_arg(arg),
        _ => Err(HandlerError::NeedMoreParams(usage)),
    }
}

/// Multi-line profile summary shown after TRACK.
pub fn format_profile(player: &Player) -> String {
    let mut lines = Vec::with_capacity(4);
    if player.country_code.is_empty() {
        lines.push(player.nickname.clone());
    } else {
        lines.push(format!(
            "{} ({})",
            player.nickname,
            player.country_code.to_uppercase()
        ));
    }
    lines.push(format!("Skill level: {}", player.skill_level));
    lines.push(format!("Elo: {}", player.elo));
    lines.push(format!(
        "Member since: {}",
        player.activated_at.format("%Y-%m-%d")
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::tests::sample_player;

    #[test]
    fn bare_nickname_passes_through() {
        assert_eq!(parse_player_arg(" s1mple ").unwrap(), "s1mple");
    }

    #[test]
    fn profile_links_are_unwrapped() {
        for link in [
            "https://www.faceit.com/en/players/ZywOo",
            "https://faceit.com/players/ZywOo/",
            "faceit.com/ru/players/ZywOo/stats/cs2?tab=matches",
        ] {
            assert_eq!(parse_player_arg(link).unwrap(), "ZywOo", "{link}");
        }
    }

    #[test]
    fn link_without_player_is_rejected() {
        assert!(matches!(
            parse_player_arg("https://www.faceit.com/en/matchroom"),
            Err(HandlerError::InvalidPlayer(_))
        ));
        assert!(parse_player_arg("two words").is_err());
    }

    #[test]
    fn missing_argument_is_usage_error() {
        assert!(matches!(
            required_player(&[], "/track <player>"),
            Err(HandlerError::NeedMoreParams("/track <player>"))
        ));
    }

    #[test]
    fn profile_summary() {
        let summary = format_profile(&sample_player("p-1", "s1mple", 3555));
        assert_eq!(
            summary,
            "s1mple (UA)\nSkill level: 10\nElo: 3555\nMember since: 2014-04-22"
        );
    }
}
