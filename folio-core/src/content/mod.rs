//! Portfolio content
//!
//! The schema for site content and the compiled-in resume that is used when
//! no content file is supplied.

pub mod defaults;
pub mod schema;

pub use defaults::builtin;
pub use schema::*;
