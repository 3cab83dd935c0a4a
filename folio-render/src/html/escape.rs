//! HTML escaping, anchor slugs and headline text projection.

/// Escape text content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double- or single-quoted attribute value.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Project a revealed headline prefix into markup.
///
/// Spaces become `&nbsp;` so a partially typed title keeps its width
/// instead of collapsing trailing whitespace.
#[must_use]
pub fn headline_text(prefix: &str) -> String {
    escape_text(prefix).replace(' ', "&nbsp;")
}

/// Slugify free-form text into an anchor id.
///
/// # Rules
/// 1. Lowercase the entire string
/// 2. Replace spaces, dashes and underscores with `-`
/// 3. Strip any character not in `[a-z0-9-]`
/// 4. Collapse consecutive dashes
/// 5. Trim leading/trailing dashes
/// 6. If result is empty, use `{prefix}-{index}`
///
/// The result is prefixed with `{prefix}-`.
#[must_use]
pub fn slugify(prefix: &str, text: &str, index: usize) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c == ' ' || c == '-' || c == '_' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
        }
    }
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        format!("{prefix}-{index}")
    } else {
        format!("{prefix}-{slug}")
    }
}
