//! Logging utilities for lucy-postproc.
//!
//! Structured `tracing` events for file loads, renders and batch runs.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::raster::GridSummary;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Run `f` and log how long it took
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    debug!(operation = operation, "Starting operation");

    let result = f();

    debug!(
        operation = operation,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log what was found in a freshly loaded raster
pub fn log_raster_load_stats(file_path: &str, shape: (usize, usize), summary: &GridSummary) {
    info!(
        operation = "raster_load",
        file_path = file_path,
        rows = shape.0,
        cols = shape.1,
        valid_cells = summary.valid,
        masked_cells = summary.masked,
        min = ?summary.min,
        max = ?summary.max,
        "Raster data loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::LucyError, context: &str) {
    error!(error = %error, context = context, "Error occurred");
}
