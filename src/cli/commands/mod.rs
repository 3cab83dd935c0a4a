//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod preview;
pub mod render;
pub mod serve;
pub mod validate;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands, ContentArgs};
use crate::config::{ContentLoader, LoadResult};
use crate::error::{ConfigError, FolioError};

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` is cancelled on Ctrl+C / SIGTERM; long-running commands stop
/// when it fires.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), FolioError> {
    match cli.command {
        Commands::Render(args) => render::run(&args),
        Commands::Serve(args) => serve::run(&args, cancel).await,
        Commands::Preview(args) => preview::run(&args, cancel).await,
        Commands::Validate(args) => validate::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the content named by `args` and logs its warnings.
fn load_content(args: &ContentArgs) -> Result<LoadResult, FolioError> {
    if let Some(path) = &args.content {
        tracing::info!(content = %path.display(), "loading content");
    }
    let result = ContentLoader::default()
        .load_or_builtin(args.content.as_deref())
        .inspect_err(log_validation_errors)?;
    for warning in &result.warnings {
        tracing::warn!(location = %warning.path, "{}", warning.message);
    }
    Ok(result)
}

/// Logs every issue carried by a validation failure; other errors are
/// reported by the caller.
fn log_validation_errors(err: &ConfigError) {
    if let ConfigError::ValidationError { errors, .. } = err {
        for issue in errors {
            tracing::error!(location = %issue.path, "{}", issue.message);
        }
    }
}
