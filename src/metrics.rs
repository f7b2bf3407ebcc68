//! Prometheus metrics collection for faceit-tracker.
//!
//! Exposed on `/metrics` when `http.metrics` is enabled.
//!
//! - `tracker_command_total{command}` - Commands dispatched by name
//! - `tracker_command_duration_seconds{command}` - Command latency histogram
//! - `tracker_command_errors_total{command,error}` - Failed commands by error kind
//! - `tracker_remote_lookups_total{outcome}` - Profile API calls by outcome
//! - `tracker_tracked_players` - Current registry size

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Commands dispatched by name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by name.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by name and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Profile API lookups by outcome (ok, remote_api, transport, decode).
pub static REMOTE_LOOKUPS: OnceLock<IntCounterVec> = OnceLock::new();

/// Players currently tracked.
pub static TRACKED_PLAYERS: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at startup before any metrics are recorded. Until
/// then every `record_*` helper is a no-op.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("tracker_command_total", "Commands dispatched by name"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("tracker_command_duration_seconds", "Command latency by name")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("tracker_command_errors_total", "Command errors by name and kind"), &["command", "error"]));
    register!(REMOTE_LOOKUPS, IntCounterVec::new(Opts::new("tracker_remote_lookups_total", "Profile API lookups by outcome"), &["outcome"]));
    register!(TRACKED_PLAYERS, IntGauge::new("tracker_tracked_players", "Players currently tracked"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record the outcome of one profile API call.
#[inline]
pub fn record_remote_lookup(outcome: &str) {
    if let Some(c) = REMOTE_LOOKUPS.get() {
        c.with_label_values(&[outcome]).inc();
    }
}

#[inline]
pub fn set_tracked_players(count: usize) {
    if let Some(g) = TRACKED_PLAYERS.get() {
        g.set(count as i64);
    }
}

#[inline]
pub fn inc_tracked_players() {
    if let Some(g) = TRACKED_PLAYERS.get() {
        g.inc();
    }
}

#[inline]
pub fn dec_tracked_players() {
    if let Some(g) = TRACKED_PLAYERS.get() {
        g.dec();
    }
}
