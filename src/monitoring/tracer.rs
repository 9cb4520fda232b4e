/*!
 * Structured Tracing
 * Subscriber setup and timing spans for blocking waits
 *
 * Features:
 * - JSON-formatted logs for structured parsing
 * - Compact human-readable output for development
 * - Slow-wait detection against a configurable threshold
 */

use std::time::{Duration, Instant};
use tracing::span::EnteredSpan;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SYNC_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SYNC_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "tracing initialized");
    }
}

/// Timing span around a blocking wait
///
/// The span is entered on creation and stays entered until drop, so events
/// the waiting thread logs meanwhile nest under it. The span is not `Send`:
/// create and drop it on the waiting thread.
///
/// Logs on drop: `warn!` when the wait outlived the slow-wait threshold,
/// `debug!` otherwise.
pub struct WaitSpan {
    span: EnteredSpan,
    start: Instant,
    operation: &'static str,
    slow_threshold: Duration,
    outcome: &'static str,
}

impl WaitSpan {
    pub fn new(operation: &'static str, slow_threshold: Duration) -> Self {
        let span = span!(
            Level::DEBUG,
            "wait",
            operation = operation,
            timeout_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        )
        .entered();

        Self {
            span,
            start: Instant::now(),
            operation,
            slow_threshold,
            outcome: "abandoned",
        }
    }

    /// Record the bound of a timed wait
    pub fn record_timeout(&self, timeout: Duration) {
        self.span.record("timeout_ms", timeout.as_millis() as u64);
    }

    /// Record how the wait ended (`ready`, `timed_out`, `broken`, ...)
    pub fn record_outcome(&mut self, outcome: &'static str) {
        self.outcome = outcome;
        self.span.record("outcome", outcome);
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for WaitSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration > self.slow_threshold {
            warn!(
                operation = self.operation,
                outcome = self.outcome,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow wait detected"
            );
        } else {
            debug!(
                operation = self.operation,
                outcome = self.outcome,
                duration_us = duration.as_micros() as u64,
                "wait completed"
            );
        }
    }
}
