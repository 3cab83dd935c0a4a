//! Icon sprite references.

use folio_core::content::Icon;

/// Sprite file served from the asset bundle.
pub const SPRITE_PATH: &str = "/assets/icons.svg";

/// Sprite document with one `<symbol>` per [`Icon`].
pub const SPRITE: &str = include_str!("../../assets/icons.svg");

/// Inline reference to an icon in the sprite.
///
/// Icons are decorative; a missing sprite leaves an empty box.
#[must_use]
pub fn icon(icon: Icon, size_class: &str) -> String {
    format!(
        "<svg class=\"icon {size_class}\" aria-hidden=\"true\" focusable=\"false\"><use href=\"{SPRITE_PATH}#{}\"></use></svg>",
        icon.name()
    )
}
