//! TRACK and UNTRACK handlers.

use super::core::{Context, Handler, HandlerError, HandlerResult, Reply};
use super::helpers::{format_profile, required_player};
use crate::services::Tracked;
use async_trait::async_trait;

pub struct TrackHandler;

#[async_trait]
impl Handler for TrackHandler {
    fn usage(&self) -> &'static str {
        "/track <player>"
    }

    fn description(&self) -> &'static str {
        "Start tracking a FACEIT player by nickname or profile link."
    }

    async fn handle(&self, ctx: &Context<'_>, args: &[String]) -> HandlerResult {
        let nickname = required_player(args, self.usage())?;
        let tracked = ctx
            .tracker
            .track(&nickname)
            .await
            .map_err(|e| HandlerError::player(&nickname, e))?;

        let headline = match &tracked {
            Tracked::New(p) => format!("Now tracking {}!", p.nickname),
            Tracked::Existing(p) => format!("{} is already being tracked.", p.nickname),
        };
        Ok(Reply::new(format!(
            "{headline}\n{}",
            format_profile(tracked.player())
        )))
    }
}

pub struct UntrackHandler;

#[async_trait]
impl Handler for UntrackHandler {
    fn usage(&self) -> &'static str {
        "/untrack <player>"
    }

    fn description(&self) -> &'static str {
        "Stop tracking a player."
    }

    async fn handle(&self, ctx: &Context<'_>, args: &[String]) -> HandlerResult {
        let nickname = required_player(args, self.usage())?;
        let removed = ctx
            .tracker
            .untrack(&nickname)
            .await
            .map_err(|e| HandlerError::player(&nickname, e))?;
        Ok(Reply::new(format!(
            "{} is no longer being tracked.",
            removed.nickname
        )))
    }
}
