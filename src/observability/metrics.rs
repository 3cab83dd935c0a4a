//! Metrics collection.
//!
//! Prometheus-compatible counters and gauges for the HTTP server and the
//! live headline streams. Recording is a no-op until [`init_metrics`]
//! installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::ServerError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Outcome label for asset requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    /// File served
    Hit,
    /// File not found
    Miss,
    /// Path rejected before touching the filesystem
    Rejected,
}

impl AssetOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Rejected => "rejected",
        }
    }
}

/// Installs the Prometheus recorder with an HTTP listener on
/// `127.0.0.1:<port>`.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if the recorder or HTTP listener
/// cannot be installed (e.g. port already in use).
pub fn init_metrics(port: u16) -> Result<(), ServerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    PrometheusBuilder::new()
        .with_http_listener(([127, 0, 0, 1], port))
        .install()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

fn describe_metrics() {
    describe_counter!("folio_page_views_total", "Total number of page renders served");
    describe_counter!(
        "folio_asset_requests_total",
        "Total number of asset requests by outcome"
    );
    describe_gauge!(
        "folio_title_streams_active",
        "Number of connected headline streams"
    );
    describe_counter!(
        "folio_title_frames_total",
        "Total number of headline frames published"
    );
}

/// Records a page view.
pub fn record_page_view() {
    counter!("folio_page_views_total").increment(1);
}

/// Records an asset request.
pub fn record_asset_request(outcome: AssetOutcome) {
    counter!("folio_asset_requests_total", "outcome" => outcome.as_str()).increment(1);
}

/// Records a headline frame publication.
pub fn record_title_frame() {
    counter!("folio_title_frames_total").increment(1);
}

/// Tracks one connected headline stream for as long as it lives.
///
/// Increments `folio_title_streams_active` on creation and decrements it on
/// drop, so every disconnect path is counted.
#[derive(Debug)]
pub struct StreamGuard(());

impl StreamGuard {
    /// Registers a new stream.
    #[must_use]
    pub fn new() -> Self {
        gauge!("folio_title_streams_active").increment(1.0);
        Self(())
    }
}

impl Default for StreamGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        gauge!("folio_title_streams_active").decrement(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_functions_do_not_panic_without_recorder() {
        record_page_view();
        record_asset_request(AssetOutcome::Hit);
        record_asset_request(AssetOutcome::Miss);
        record_asset_request(AssetOutcome::Rejected);
        record_title_frame();
        let guard = StreamGuard::new();
        drop(guard);
    }

    #[test]
    fn asset_outcome_labels() {
        assert_eq!(AssetOutcome::Hit.as_str(), "hit");
        assert_eq!(AssetOutcome::Miss.as_str(), "miss");
        assert_eq!(AssetOutcome::Rejected.as_str(), "rejected");
    }
}
