//! Command handlers for the tracker bot.
//!
//! Each handler answers one slash command. The [`Registry`] owns them and
//! routes interactions by name.

mod core;
mod help;
mod helpers;
mod list;
mod ping;
mod tracking;

pub use core::{Context, Handler, HandlerError, HandlerResult, Interaction, Registry, Reply};
