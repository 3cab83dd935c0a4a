//! `Folio` Core - shared content schema and presentation state
//!
//! This crate provides the portfolio content types, the compiled-in resume
//! content, entrance animation parameters and the title cycle state machine
//! shared across `folio` (CLI/server) and `folio-render` (HTML generation).

pub mod content;
pub mod cycle;
pub mod error;
pub mod motion;
pub mod validation;
