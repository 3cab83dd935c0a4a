//! HTML page generation.
//!
//! - [`escape`] - text/attribute escaping, anchor slugs, headline projection
//! - [`icons`] - sprite references for [`folio_core::content::Icon`]
//! - [`motion`] - data attributes and CSS custom properties for animations
//! - [`section`] - the titled section template
//! - [`page`] - the full document

pub mod escape;
pub mod icons;
pub mod motion;
pub mod page;
pub mod section;
