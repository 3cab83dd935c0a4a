//! Titled section template.

use folio_core::content::Icon;

use super::escape::{escape_attr, escape_text};
use super::icons::icon;

/// Wrap `body` in a titled section reachable at `#{id}`.
///
/// The icon, when given, sits in a badge before the heading.
#[must_use]
pub fn render_section(id: &str, title: &str, section_icon: Option<Icon>, body: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("<section id=\"{}\" class=\"section\">", escape_attr(id)));
    lines.push("  <div class=\"container\">".to_string());
    lines.push("    <div class=\"section-heading\">".to_string());
    if let Some(i) = section_icon {
        lines.push(format!(
            "      <span class=\"icon-badge\">{}</span>",
            icon(i, "icon-md")
        ));
    }
    lines.push(format!("      <h2>{}</h2>", escape_text(title)));
    lines.push("    </div>".to_string());
    lines.push(body.to_string());
    lines.push("  </div>".to_string());
    lines.push("</section>".to_string());
    lines.join("\n")
}
