//! `Folio` - single-page portfolio renderer and server
//!
//! Renders [`folio_core::content::SiteContent`] into a static page, or
//! serves it over HTTP with the headline typewriter driven by a tokio task
//! per connected client.

pub mod cli;
pub mod config;
pub mod cycler;
pub mod error;
pub mod observability;
pub mod server;
