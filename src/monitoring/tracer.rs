/*!
 * Run Tracing
 * Structured tracing for simulation runs using the tracing crate
 *
 * Features:
 * - Run id generation for log correlation
 * - JSON-formatted logs for structured parsing
 * - Wall-clock duration recorded on every run span
 */

use crate::core::limits::SLOW_RUN_MS;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHEDSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("SCHEDSIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Span covering one simulation run
///
/// Logs the wall-clock duration when dropped.
pub struct RunSpan {
    span: Span,
    start: Instant,
    run_id: Uuid,
}

impl RunSpan {
    pub fn new(algorithm: &str, cores: usize) -> Self {
        let run_id = Uuid::new_v4();

        let span = span!(
            Level::INFO,
            "simulation",
            algorithm = algorithm,
            run_id = %run_id,
            cores = cores,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span
            .record("duration_us", duration.as_micros() as u64);

        if duration.as_millis() > SLOW_RUN_MS {
            warn!(
                run_id = %self.run_id,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow simulation run"
            );
        } else {
            debug!(
                run_id = %self.run_id,
                duration_us = duration.as_micros() as u64,
                "simulation run finished"
            );
        }
    }
}
