//! Serve command
//!
//! Loads content, renders the page once and serves it until Ctrl+C or
//! SIGTERM cancels the shared token.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::load_content;
use crate::cli::args::ServeArgs;
use crate::error::FolioError;
use crate::observability::init_metrics;
use crate::server::{AppState, bind, parse_bind_addr, serve};

/// Start the HTTP server.
///
/// # Errors
///
/// Returns a content error if loading fails, a render error if the page
/// cannot be built, or a server error if binding or serving fails.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), FolioError> {
    if let Some(port) = args.metrics_port {
        init_metrics(port)?;
        info!(port, "Prometheus metrics endpoint started");
    }

    let addr = parse_bind_addr(&args.bind)?;
    let loaded = load_content(&args.content)?;

    if !args.asset_dir.is_dir() {
        warn!(
            asset_dir = %args.asset_dir.display(),
            "asset directory not found; static files will 404"
        );
    }

    let state = AppState::new(
        loaded.content,
        args.asset_dir.clone(),
        args.reduced_motion,
        cancel,
    )?;
    let listener = bind(addr).await?;
    serve(listener, state).await?;
    Ok(())
}
