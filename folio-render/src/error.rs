//! Render error types.

use thiserror::Error;

/// Errors raised while assembling the page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Two elements would share the same in-page anchor.
    #[error("duplicate anchor '#{anchor}' (from '{source_text}')")]
    DuplicateAnchor {
        /// The colliding anchor id
        anchor: String,
        /// Text the anchor was derived from
        source_text: String,
    },
}
