//! PING handler.

use super::core::{Context, Handler, HandlerResult, Reply};
use async_trait::async_trait;
use chrono::Utc;

pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    fn usage(&self) -> &'static str {
        "/ping"
    }

    fn description(&self) -> &'static str {
        "Check that the bot is alive."
    }

    async fn handle(&self, ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
        // Clock skew can put created_at in the future.
        let latency = (Utc::now() - ctx.interaction.created_at)
            .num_milliseconds()
            .max(0);
        Ok(Reply::new(format!("Pong! Latency: {latency}ms")))
    }
}
