//! Command handler registry and dispatch.
//!
//! The `Registry` maps command names to handlers and keeps usage counters.
//! Every known command yields exactly one [`Reply`], errors included.
//! Unknown commands are ignored unless `bot.reply_unknown_commands` is set.

use super::context::{Context, Handler, Interaction, Reply};
use crate::config::BotConfig;
use crate::handlers::{
    help::HelpHandler,
    list::ListHandler,
    ping::PingHandler,
    tracking::{TrackHandler, UntrackHandler},
};
use crate::services::TrackingService;
use crate::telemetry::{CommandTimer, spans};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Instrument, debug, warn};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Registration order, used for HELP.
    order: Vec<&'static str>,
    /// Command usage counters.
    command_counts: HashMap<&'static str, Arc<AtomicU64>>,
    bot_name: String,
    reply_unknown: bool,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new(bot: &BotConfig) -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            order: Vec::new(),
            command_counts: HashMap::new(),
            bot_name: bot.name.clone(),
            reply_unknown: bot.reply_unknown_commands,
        };

        registry.register("ping", Box::new(PingHandler));
        registry.register("help", Box::new(HelpHandler));
        registry.register("track", Box::new(TrackHandler));
        registry.register("untrack", Box::new(UntrackHandler));
        registry.register("list", Box::new(ListHandler));

        registry
    }

    fn register(&mut self, name: &'static str, handler: Box<dyn Handler>) {
        self.handlers.insert(name, handler);
        self.order.push(name);
        self.command_counts.insert(name, Arc::new(AtomicU64::new(0)));
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Registered handlers in registration order.
    pub fn commands(&self) -> impl Iterator<Item = (&'static str, &dyn Handler)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.handlers.get(name).map(|h| (*name, h.as_ref())))
    }

    /// Command usage statistics, most used first.
    pub fn get_command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch an interaction to its handler.
    ///
    /// Returns `None` only for an unknown command that is being ignored.
    pub async fn dispatch(
        &self,
        tracker: &TrackingService,
        interaction: &Interaction,
    ) -> Option<Reply> {
        let cmd_name = interaction
            .command
            .trim()
            .trim_start_matches('/')
            .to_ascii_lowercase();

        let Some((&name, handler)) = self.handlers.get_key_value(cmd_name.as_str()) else {
            crate::metrics::record_command_error("unknown", "unknown_command");
            debug!(command = %cmd_name, "Unknown command");
            return self.reply_unknown.then(|| {
                Reply::new(format!(
                    "Unknown command `{cmd_name}`. Use `/help` for a list of commands."
                ))
            });
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let span = spans::command(name, interaction.user.as_deref());
        let _timer = CommandTimer::new(name);

        let ctx = Context {
            tracker,
            interaction,
            registry: self,
        };

        let reply = match handler.handle(&ctx, &interaction.args).instrument(span).await {
            Ok(reply) => reply,
            Err(e) => {
                crate::metrics::record_command_error(name, e.error_code());
                if e.is_internal() {
                    warn!(command = %name, error = %e, "Command failed");
                } else {
                    debug!(command = %name, error = %e, "Command error");
                }
                e.to_reply()
            }
        };

        Some(reply)
    }
}
