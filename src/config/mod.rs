//! Content loading
//!
//! Reads YAML content files, validates them and freezes the result behind
//! an `Arc`. Without a file the compiled-in content is used.

pub mod loader;

pub use loader::{ContentLoader, LoadResult, LoaderOptions};
