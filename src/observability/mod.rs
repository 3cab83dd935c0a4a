//! Observability
//!
//! Logging and metrics for the `folio` binary.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::init_metrics;
