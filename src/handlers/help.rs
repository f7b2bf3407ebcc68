//! HELP handler.

use super::core::{Context, Handler, HandlerResult, Reply};
use async_trait::async_trait;

pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    fn usage(&self) -> &'static str {
        "/help"
    }

    fn description(&self) -> &'static str {
        "Show the available commands."
    }

    async fn handle(&self, ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
        let mut lines = vec![format!("{} commands:", ctx.registry.bot_name())];
        lines.extend(
            ctx.registry
                .commands()
                .map(|(_, handler)| format!("`{}` - {}", handler.usage(), handler.description())),
        );
        Ok(Reply::new(lines.join("\n")))
    }
}
