//! `Folio` Render - HTML generation for the portfolio page
//!
//! Turns [`folio_core::content::SiteContent`] and the motion parameters from
//! [`folio_core::motion`] into a single self-contained HTML document.

pub mod error;
pub mod html;

pub use error::RenderError;
pub use html::icons::SPRITE;
pub use html::page::{RenderOptions, render_page};
