//! Content loader
//!
//! Loading pipeline:
//! 1. Size check against [`LoaderOptions::max_content_size`]
//! 2. Read, strip a UTF-8 BOM
//! 3. YAML parsing into [`SiteContent`] (parse errors carry the line)
//! 4. Validation
//! 5. Freeze with `Arc`

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use folio_core::content::{SiteContent, builtin};
use folio_core::error::{ConfigError, ValidationIssue};
use folio_core::validation::{ValidationResult, Validator};

/// Environment variable overriding the content size limit, in bytes.
pub const MAX_CONTENT_SIZE_ENV: &str = "FOLIO_MAX_CONTENT_SIZE";

/// Default content size limit (1 MiB).
pub const DEFAULT_MAX_CONTENT_SIZE: u64 = 1024 * 1024;

/// Options for the content loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum content file size in bytes.
    pub max_content_size: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_content_size: env_or(MAX_CONTENT_SIZE_ENV, DEFAULT_MAX_CONTENT_SIZE),
        }
    }
}

/// Result of loading content.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated content.
    pub content: Arc<SiteContent>,

    /// Validation warnings; the content is still usable.
    pub warnings: Vec<ValidationIssue>,
}

/// Content loader.
#[derive(Debug, Default)]
pub struct ContentLoader {
    options: LoaderOptions,
}

impl ContentLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads `path` when given, the compiled-in content otherwise.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_or_builtin(&self, path: Option<&Path>) -> Result<LoadResult, ConfigError> {
        match path {
            Some(path) => self.load(path),
            None => {
                tracing::debug!("using built-in content");
                Ok(LoadResult {
                    content: Arc::new(builtin().clone()),
                    warnings: Vec::new(),
                })
            }
        }
    }

    /// Loads and validates a content file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or too large, if parsing
    /// fails, or if validation reports any error.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let content = self.parse(path)?;
        let result = Validator::new().validate(&content);

        if !result.is_valid() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: result.errors,
            });
        }

        Ok(LoadResult {
            content: Arc::new(content),
            warnings: result.warnings,
        })
    }

    /// Loads a content file and returns every validation issue, without
    /// failing on validation errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, too large or unparseable.
    pub fn check(&self, path: &Path) -> Result<ValidationResult, ConfigError> {
        let content = self.parse(path)?;
        Ok(Validator::new().validate(&content))
    }

    /// Reads and parses a content file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or too large, or if parsing
    /// fails.
    pub fn parse(&self, path: &Path) -> Result<SiteContent, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;

        if metadata.len() > self.options.max_content_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.options.max_content_size,
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        if raw.trim().is_empty() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "content file is empty".to_string(),
            });
        }

        let content: SiteContent =
            serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            projects = content.projects.len(),
            titles = content.profile.titles.len(),
            "content parsed"
        );
        Ok(content)
    }
}

fn read_error(path: &Path, error: std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    match error.kind() {
        ErrorKind::NotFound => ConfigError::MissingFile { path },
        ErrorKind::InvalidData => ConfigError::ParseError {
            path,
            line: None,
            message: "content file is not valid UTF-8".to_string(),
        },
        _ => ConfigError::Unreadable {
            path,
            source: error,
        },
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
