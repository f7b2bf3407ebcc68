//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the [`Handler`] trait, the per-interaction [`Context`], and the
//! [`Registry`] that routes command names to handlers.

pub mod context;
pub mod registry;

pub use context::{Context, Handler, HandlerError, HandlerResult, Interaction, Reply};
pub use registry::Registry;
