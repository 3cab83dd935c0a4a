//! CLI argument definitions
//!
//! All Clap derive structs for `folio` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

/// Default asset directory, relative to the working directory.
pub const DEFAULT_ASSET_DIR: &str = "public";

// ============================================================================
// Root CLI
// ============================================================================

/// Single-page portfolio renderer and server.
#[derive(Parser, Debug)]
#[command(name = "folio", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "FOLIO_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the page to a static directory.
    Render(RenderArgs),

    /// Serve the page over HTTP with a live headline.
    Serve(ServeArgs),

    /// Play the headline typewriter in the terminal.
    Preview(PreviewArgs),

    /// Validate content files without rendering.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

/// Content source shared by the page-producing commands.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// YAML content file; the built-in content is used when omitted.
    #[arg(short, long, env = "FOLIO_CONTENT")]
    pub content: Option<PathBuf>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Output directory.
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Directory holding the profile image and other static files.
    #[arg(long, default_value = DEFAULT_ASSET_DIR, env = "FOLIO_ASSET_DIR")]
    pub asset_dir: PathBuf,

    /// Render without vertical animation offsets.
    #[arg(long)]
    pub reduced_motion: bool,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Bind address: `[host]:port` or a bare port.
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "FOLIO_BIND")]
    pub bind: String,

    /// Directory holding the profile image and other static files.
    #[arg(long, default_value = DEFAULT_ASSET_DIR, env = "FOLIO_ASSET_DIR")]
    pub asset_dir: PathBuf,

    /// Serve the page without vertical animation offsets.
    #[arg(long)]
    pub reduced_motion: bool,

    /// Expose Prometheus metrics on `127.0.0.1:<PORT>`.
    #[arg(long)]
    pub metrics_port: Option<u16>,
}

/// Arguments for `preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// How long to play (e.g. `5s`); defaults to one full cycle.
    #[arg(short, long, value_parser = humantime::parse_duration)]
    pub duration: Option<Duration>,

    /// Print one cycle's frames with their offsets instead of playing.
    #[arg(long)]
    pub timeline: bool,

    /// Output format for `--timeline`.
    #[arg(short, long, default_value = "human", requires = "timeline")]
    pub format: OutputFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Content files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
