//! Error types for `Folio`
//!
//! Aggregates the per-crate error enums and maps each one to a process
//! exit code.

use thiserror::Error;

pub use folio_core::error::{ConfigError, Severity, ValidationIssue};
pub use folio_render::RenderError;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `folio` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Content error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// HTTP server error (bind failed, listener error)
    pub const SERVER_ERROR: i32 = 4;

    /// Page could not be rendered
    pub const RENDER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `folio` operations.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Content loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FolioError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::Unreadable { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Render(_) => ExitCode::RENDER_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
        }
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bind address could not be parsed
    #[error("invalid bind address \"{input}\": {message}")]
    InvalidBindAddr {
        /// Address as given
        input: String,
        /// Parser message
        message: String,
    },

    /// Listener could not be bound
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Address we tried to bind
        addr: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The server stopped with an error
    #[error("server error: {0}")]
    Serve(std::io::Error),

    /// Metrics recorder or exporter could not be installed
    #[error("metrics exporter failed: {0}")]
    Metrics(String),
}
