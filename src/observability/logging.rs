//! Logging initialization.
//!
//! `-v` raises the level of Folio's own crates only; the HTTP stack stays
//! at `warn` until `-vvv`. `--quiet` keeps errors, so content problems are
//! still reported. `FOLIO_LOG_LEVEL` replaces the derived filter entirely.

use std::fmt::Write as _;
use std::io::IsTerminal;

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable that replaces the derived filter.
pub const LOG_LEVEL_ENV: &str = "FOLIO_LOG_LEVEL";

/// Crates whose level follows `-v`.
const FOLIO_TARGETS: [&str; 3] = ["folio", "folio_core", "folio_render"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Level for Folio's crates at a given `-v` count.
#[must_use]
pub const fn folio_level(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter directives used when `FOLIO_LOG_LEVEL` is unset.
///
/// Dependencies log at `warn` (`error` when quiet); from `-vvv` on they
/// follow Folio's level so request handling inside axum and hyper shows up.
#[must_use]
pub fn default_directives(verbosity: u8, quiet: bool) -> String {
    let level = folio_level(verbosity, quiet);
    let base = if quiet {
        Level::ERROR
    } else if verbosity >= 3 {
        level
    } else {
        Level::WARN
    };
    let level = level.as_str().to_ascii_lowercase();
    let mut directives = base.as_str().to_ascii_lowercase();
    for target in FOLIO_TARGETS {
        let _ = write!(directives, ",{target}={level}");
    }
    directives
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Installs the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, quiet: bool, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity, quiet)));

    // Module paths only help once debugging.
    let show_target = verbosity >= 2;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(use_ansi(color)).try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };
}
