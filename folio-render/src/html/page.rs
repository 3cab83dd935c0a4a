//! Full page generation.
//!
//! Assembles header, hero, content sections and footer into one
//! self-contained HTML document with inline stylesheet and script.

use std::collections::HashSet;

use chrono::Datelike;
use folio_core::content::{Accent, Channel, CycleTiming, Icon, Profile, SiteContent};
use folio_core::motion::MotionController;

use crate::error::RenderError;

use super::escape::{escape_attr, escape_text, headline_text, slugify};
use super::icons::icon;
use super::motion::motion_attrs;
use super::section::render_section;

const STYLESHEET: &str = include_str!("../../assets/site.css");
const SCRIPT: &str = include_str!("../../assets/site.js");

/// In-page anchors of the top-level sections, in document order.
pub const SECTION_ANCHORS: [&str; 5] = ["home", "projects", "skills", "certs", "contact"];

/// Knobs for a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Collapse every vertical animation offset to zero
    pub reduced_motion: bool,
    /// Year printed in the footer
    pub year: i32,
    /// Server-Sent Events URL driving the headline, when served live
    pub title_stream: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            year: chrono::Local::now().year(),
            title_stream: None,
        }
    }
}

/// Tracks anchor ids so no two elements share one.
#[derive(Default)]
struct Anchors(HashSet<String>);

impl Anchors {
    fn claim(&mut self, id: String, source_text: &str) -> Result<String, RenderError> {
        if self.0.insert(id.clone()) {
            Ok(id)
        } else {
            Err(RenderError::DuplicateAnchor {
                anchor: id,
                source_text: source_text.to_string(),
            })
        }
    }
}

/// Render the complete page.
///
/// # Errors
///
/// Returns [`RenderError::DuplicateAnchor`] if two projects or
/// certifications slugify to the same anchor id.
pub fn render_page(content: &SiteContent, options: &RenderOptions) -> Result<String, RenderError> {
    let motion = MotionController::new(options.reduced_motion);
    let mut anchors = Anchors::default();
    for anchor in SECTION_ANCHORS {
        anchors.claim(anchor.to_string(), anchor)?;
    }

    let profile = &content.profile;
    let body_class = if options.reduced_motion {
        " class=\"reduced-motion\""
    } else {
        ""
    };

    let mut sections = Vec::new();
    sections.push("<!doctype html>".to_string());
    // site.js drops `no-js` on load; until then reveal targets stay visible.
    sections.push("<html lang=\"en\" class=\"no-js\">".to_string());
    sections.push("<head>".to_string());
    sections.push("<meta charset=\"utf-8\">".to_string());
    sections.push(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
    );
    sections.push(format!("<title>{} · Portfolio</title>", escape_text(&profile.name)));
    if !profile.about.is_empty() {
        sections.push(format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_attr(&profile.about)
        ));
    }
    sections.push(format!("<style>\n{STYLESHEET}</style>"));
    sections.push("</head>".to_string());
    sections.push(format!("<body{body_class}>"));

    // Floating gradient orbs
    sections.push("<div class=\"orbs\" aria-hidden=\"true\">".to_string());
    sections.push("  <div class=\"orb orb-fuchsia\"></div>".to_string());
    sections.push("  <div class=\"orb orb-indigo\"></div>".to_string());
    sections.push("  <div class=\"orb orb-emerald\"></div>".to_string());
    sections.push("</div>".to_string());

    sections.push(render_header(content));
    sections.push(render_hero(content, &motion, options));
    sections.push(render_projects(content, &motion, &mut anchors)?);
    sections.push(render_skills(content, &motion));
    sections.push(render_certifications(content, &motion, &mut anchors)?);
    sections.push(render_contact(content, &motion));
    sections.push(render_footer(profile, options.year));

    sections.push(format!("<script>\n{SCRIPT}</script>"));
    sections.push("</body>".to_string());
    sections.push("</html>".to_string());

    Ok(sections.join("\n"))
}

// ============================================================================
// Links
// ============================================================================

/// `href` plus new-context attributes for links that leave the page.
fn href_attrs(href: &str, external: bool) -> String {
    if external {
        format!(
            " href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
            escape_attr(href)
        )
    } else {
        format!(" href=\"{}\"", escape_attr(href))
    }
}

fn channel_link(content: &SiteContent, channel: Channel, class: &str, inner: &str) -> Option<String> {
    content.links.get(channel).map(|href| {
        format!(
            "<a class=\"{class}\"{} aria-label=\"{}\">{inner}</a>",
            href_attrs(href, channel.is_external()),
            channel.label()
        )
    })
}

// ============================================================================
// Header / Hero
// ============================================================================

fn render_header(content: &SiteContent) -> String {
    let mut lines = Vec::new();
    lines.push("<header class=\"site-header\">".to_string());
    lines.push("  <nav class=\"container nav\">".to_string());
    lines.push(format!(
        "    <a href=\"#home\" class=\"brand\">{} {}</a>",
        icon(Icon::Sparkles, "icon-md"),
        escape_text(&content.profile.name)
    ));
    lines.push("    <ul class=\"nav-links\">".to_string());
    for (anchor, label) in [
        ("projects", "Projects"),
        ("skills", "Skills"),
        ("certs", "Certifications"),
        ("contact", "Contact"),
    ] {
        lines.push(format!("      <li><a href=\"#{anchor}\">{label}</a></li>"));
    }
    lines.push("    </ul>".to_string());
    lines.push("    <div class=\"nav-social\">".to_string());
    for channel in [Channel::Github, Channel::Linkedin, Channel::Email] {
        if let Some(link) = channel_link(
            content,
            channel,
            "icon-button",
            &icon(channel.icon(), "icon-md"),
        ) {
            lines.push(format!("      {link}"));
        }
    }
    lines.push("    </div>".to_string());
    lines.push("  </nav>".to_string());
    lines.push("</header>".to_string());
    lines.join("\n")
}

fn render_headline(profile: &Profile, timing: CycleTiming, options: &RenderOptions) -> String {
    let Some(first) = profile.titles.first() else {
        return format!(
            "<h1 class=\"hero-title\">{}</h1>",
            escape_text(&profile.name)
        );
    };

    let titles_json = serde_json::to_string(&profile.titles).unwrap_or_else(|_| "[]".to_string());
    let stream_attr = options
        .title_stream
        .as_deref()
        .map(|url| format!(" data-stream=\"{}\"", escape_attr(url)))
        .unwrap_or_default();

    format!(
        "<h1 class=\"hero-title\" id=\"hero-title\" aria-label=\"{}\" data-titles=\"{}\" data-interval-ms=\"{}\" data-pause-ms=\"{}\"{stream_attr}><span class=\"hero-title-text\" aria-hidden=\"true\">{}</span><span class=\"caret\" aria-hidden=\"true\"></span></h1>",
        escape_attr(&profile.titles.join(", ")),
        escape_attr(&titles_json),
        timing.interval.as_millis(),
        timing.pause.as_millis(),
        headline_text(first),
    )
}

fn render_hero(content: &SiteContent, motion: &MotionController, options: &RenderOptions) -> String {
    let profile = &content.profile;
    let fade = motion_attrs(&motion.fade_up(), None);

    let mut lines = Vec::new();
    lines.push("<section id=\"home\" class=\"hero\">".to_string());
    lines.push("  <div class=\"container hero-grid\">".to_string());
    lines.push(format!("    <div class=\"hero-copy\"{fade}>"));
    if let Some(badge) = &profile.availability {
        lines.push(format!(
            "      <p class=\"badge\"><span class=\"badge-dot\"></span> {}</p>",
            escape_text(badge)
        ));
    }
    lines.push(format!(
        "      {}",
        render_headline(profile, content.title_cycle, options)
    ));
    if !profile.about.is_empty() {
        lines.push(format!(
            "      <p class=\"hero-about\">{}</p>",
            escape_text(&profile.about)
        ));
    }
    lines.push("      <div class=\"hero-actions\">".to_string());
    lines.push("        <a href=\"#projects\" class=\"button button-primary\">View Projects</a>".to_string());
    if let Some(link) = channel_link(
        content,
        Channel::Leetcode,
        "button button-ghost",
        &format!("{} LeetCode", icon(Icon::Code, "icon-sm")),
    ) {
        lines.push(format!("        {link}"));
    }
    lines.push("      </div>".to_string());
    lines.push("    </div>".to_string());
    lines.push(format!("    <div class=\"hero-portrait\"{fade}>"));
    lines.push("      <div class=\"portrait-glow\"></div>".to_string());
    lines.push("      <div class=\"portrait-frame\">".to_string());
    lines.push(format!(
        "        <img src=\"{}\" alt=\"{}\" class=\"portrait\">",
        escape_attr(&profile.image),
        escape_attr(&profile.name)
    ));
    lines.push("      </div>".to_string());
    lines.push("    </div>".to_string());
    lines.push("  </div>".to_string());
    lines.push("</section>".to_string());
    lines.join("\n")
}

// ============================================================================
// Sections
// ============================================================================

fn render_projects(
    content: &SiteContent,
    motion: &MotionController,
    anchors: &mut Anchors,
) -> Result<String, RenderError> {
    let hover = motion.hover_lift();
    let mut lines = vec!["    <div class=\"grid grid-3\">".to_string()];

    for (i, project) in content.projects.iter().enumerate() {
        let id = anchors.claim(slugify("project", &project.title, i), &project.title)?;
        let accent = project.accent.unwrap_or_else(|| Accent::for_index(i));
        lines.push(format!(
            "      <article id=\"{id}\" class=\"card project accent-{}\"{}>",
            accent.as_str(),
            motion_attrs(&motion.stagger_item(i), Some(&hover))
        ));
        lines.push("        <div class=\"card-inner\">".to_string());
        lines.push(format!("          <h3>{}</h3>", escape_text(&project.title)));
        lines.push(format!(
            "          <p class=\"card-body\">{}</p>",
            escape_text(&project.description)
        ));
        if !project.tech.is_empty() {
            lines.push("          <ul class=\"tags\">".to_string());
            for tech in &project.tech {
                lines.push(format!("            <li>{}</li>", escape_text(tech)));
            }
            lines.push("          </ul>".to_string());
        }
        if !project.links.is_empty() {
            lines.push("          <div class=\"card-links\">".to_string());
            for link in &project.links {
                lines.push(format!(
                    "            <a class=\"button button-primary button-sm\"{}>{} {}</a>",
                    href_attrs(&link.href, true),
                    icon(link.icon, "icon-sm"),
                    escape_text(&link.label)
                ));
            }
            lines.push("          </div>".to_string());
        }
        lines.push("        </div>".to_string());
        lines.push("      </article>".to_string());
    }
    lines.push("    </div>".to_string());

    Ok(render_section(
        "projects",
        "Projects",
        Some(Icon::Code),
        &lines.join("\n"),
    ))
}

fn render_skills(content: &SiteContent, motion: &MotionController) -> String {
    let hover = motion.hover_lift();
    let mut lines = vec!["    <div class=\"grid grid-3\">".to_string()];

    for (i, group) in content.skills.iter().enumerate() {
        lines.push(format!(
            "      <div class=\"card skill-group\"{}>",
            motion_attrs(&motion.stagger_item(i), Some(&hover))
        ));
        lines.push(format!(
            "        <div class=\"card-heading\">{} <h3>{}</h3></div>",
            icon(group.icon, "icon-md"),
            escape_text(&group.name)
        ));
        lines.push("        <div class=\"chips\">".to_string());
        for item in &group.items {
            lines.push(format!(
                "          <span class=\"chip\">{}</span>",
                escape_text(item)
            ));
        }
        lines.push("        </div>".to_string());
        lines.push("      </div>".to_string());
    }
    lines.push("    </div>".to_string());

    render_section(
        "skills",
        "Skills",
        Some(Icon::GraduationCap),
        &lines.join("\n"),
    )
}

fn render_certifications(
    content: &SiteContent,
    motion: &MotionController,
    anchors: &mut Anchors,
) -> Result<String, RenderError> {
    let hover = motion.hover_lift();
    let mut lines = vec!["    <div class=\"grid grid-3\">".to_string()];

    for (i, cert) in content.certifications.iter().enumerate() {
        let id = anchors.claim(slugify("cert", &cert.name, i), &cert.name)?;
        lines.push(format!(
            "      <a id=\"{id}\" class=\"card cert\"{}{}>",
            href_attrs(&cert.href, true),
            motion_attrs(&motion.stagger_item(i), Some(&hover))
        ));
        lines.push("        <div class=\"cert-heading\">".to_string());
        lines.push("          <div>".to_string());
        lines.push(format!("            <h3>{}</h3>", escape_text(&cert.name)));
        lines.push(format!(
            "            <p class=\"muted\">{} • {}</p>",
            escape_text(&cert.org),
            escape_text(&cert.date)
        ));
        lines.push("          </div>".to_string());
        lines.push(format!("          {}", icon(Icon::ExternalLink, "icon-sm cert-arrow")));
        lines.push("        </div>".to_string());
        lines.push("        <p class=\"muted\">Click to view certificate</p>".to_string());
        lines.push("      </a>".to_string());
    }
    lines.push("    </div>".to_string());

    Ok(render_section(
        "certs",
        "Certifications",
        Some(Icon::Trophy),
        &lines.join("\n"),
    ))
}

fn render_contact(content: &SiteContent, motion: &MotionController) -> String {
    let mut lines = vec![format!(
        "    <div class=\"card contact\"{}>",
        motion_attrs(&motion.fade_up(), None)
    )];
    if !content.profile.contact_blurb.is_empty() {
        lines.push(format!(
            "      <p class=\"muted\">{}</p>",
            escape_text(&content.profile.contact_blurb)
        ));
    }
    lines.push("      <div class=\"grid grid-4 contact-links\">".to_string());
    for channel in Channel::ALL {
        let class = if channel == Channel::Email {
            "button button-primary"
        } else {
            "button button-ghost"
        };
        let inner = format!("{} {}", icon(channel.icon(), "icon-sm"), channel.label());
        if let Some(link) = channel_link(content, channel, class, &inner) {
            lines.push(format!("        {link}"));
        }
    }
    lines.push("      </div>".to_string());
    lines.push("    </div>".to_string());

    render_section("contact", "Contact", Some(Icon::Send), &lines.join("\n"))
}

fn render_footer(profile: &Profile, year: i32) -> String {
    let credit = profile
        .credit
        .as_deref()
        .map(|c| format!(" • {}", escape_text(c)))
        .unwrap_or_default();
    format!(
        "<footer class=\"site-footer\">© {year} {}{credit}</footer>",
        escape_text(&profile.name)
    )
}
