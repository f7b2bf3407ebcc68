//! Core services.
//!
//! [`TrackingService`] is the only stateful component the command handlers
//! talk to.

pub mod tracking;

pub use tracking::{Tracked, TrackingService};
