//! Animation parameters as markup.
//!
//! Reveal and hover parameters are emitted as `data-reveal*` attributes and
//! CSS custom properties. The page stylesheet and script read them; the
//! values themselves come from [`folio_core::motion`].

use std::fmt::Write as _;

use folio_core::motion::{HoverParams, RevealParams};

/// Attributes for an element revealed on scroll, optionally lifting on hover.
///
/// Returns a leading-space attribute string ready to splice into a tag.
#[must_use]
pub fn motion_attrs(reveal: &RevealParams, hover: Option<&HoverParams>) -> String {
    let mut style = format!(
        "--reveal-y:{}px;--reveal-opacity:{};--reveal-duration:{}ms;--reveal-delay:{}ms;--reveal-ease:{}",
        reveal.initial.y,
        reveal.initial.opacity,
        reveal.timing.duration.as_millis(),
        reveal.timing.delay.as_millis(),
        reveal.timing.easing.css(),
    );
    if let Some(hover) = hover {
        let _ = write!(
            style,
            ";--hover-y:{}px;--hover-duration:{}ms",
            hover.hover.y,
            hover.timing.duration.as_millis()
        );
    }

    let mode = if reveal.viewport.once { "once" } else { "always" };
    format!(
        " data-reveal=\"{mode}\" data-reveal-amount=\"{}\" style=\"{style}\"",
        reveal.viewport.amount
    )
}
