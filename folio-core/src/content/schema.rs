//! Content schema types
//!
//! The portfolio's data model: profile, contact links, projects, skill
//! groups and certifications. Every type deserializes from YAML content
//! files and serializes to JSON for the `/content.json` endpoint.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Top-Level Content
// ============================================================================

/// Everything the page renders.
///
/// Loaded once at startup (compiled-in or from a content file) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SiteContent {
    /// Owner identity and hero copy (required)
    pub profile: Profile,

    /// Contact channels
    #[serde(default)]
    pub links: LinkSet,

    /// Project cards, in display order
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Skill groups, in display order
    #[serde(default)]
    pub skills: Vec<SkillGroup>,

    /// Certifications, in display order
    #[serde(default)]
    pub certifications: Vec<Certification>,

    /// Headline typing cadence
    #[serde(default)]
    pub title_cycle: CycleTiming,
}

// ============================================================================
// Profile
// ============================================================================

/// Owner identity and the hero/contact/footer copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Profile {
    /// Display name shown in the header, hero image alt text and footer
    pub name: String,

    /// Badge above the headline (e.g. "Available for Internships")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    /// Headline titles cycled by the typewriter, in order
    #[serde(default)]
    pub titles: Vec<String>,

    /// Paragraph under the headline
    #[serde(default)]
    pub about: String,

    /// Profile image path inside the asset bundle
    #[serde(default = "default_image")]
    pub image: String,

    /// Paragraph at the top of the contact section
    #[serde(default)]
    pub contact_blurb: String,

    /// Footer credit after the copyright line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

fn default_image() -> String {
    "/akriti.jpg".to_string()
}

// ============================================================================
// Links
// ============================================================================

/// Contact channel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Email composition (`mailto:`)
    Email,
    /// Code repository profile
    Github,
    /// Professional network profile
    Linkedin,
    /// Coding practice profile
    Leetcode,
}

impl Channel {
    /// All channels in contact-section order.
    pub const ALL: [Self; 4] = [Self::Email, Self::Linkedin, Self::Github, Self::Leetcode];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Leetcode => "LeetCode",
        }
    }

    /// Glyph shown next to the label.
    #[must_use]
    pub const fn icon(self) -> Icon {
        match self {
            Self::Email => Icon::Mail,
            Self::Github => Icon::Github,
            Self::Linkedin => Icon::Linkedin,
            Self::Leetcode => Icon::Link,
        }
    }

    /// Whether the link leaves the page and opens in a new browsing context.
    #[must_use]
    pub const fn is_external(self) -> bool {
        !matches!(self, Self::Email)
    }
}

/// Fixed mapping from contact channel to URI, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkSet(IndexMap<Channel, String>);

impl LinkSet {
    /// Returns the URI for `channel`, if configured.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&str> {
        self.0.get(&channel).map(String::as_str)
    }

    /// Iterates configured channels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &str)> {
        self.0.iter().map(|(c, uri)| (*c, uri.as_str()))
    }

    /// Number of configured channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no channel is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Channel, String)> for LinkSet {
    fn from_iter<I: IntoIterator<Item = (Channel, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Projects / Skills / Certifications
// ============================================================================

/// A project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Project {
    /// Card heading
    pub title: String,

    /// Card body
    pub description: String,

    /// Technology tags, in display order
    #[serde(default)]
    pub tech: Vec<String>,

    /// Outbound links (repository, demo, ...)
    #[serde(default)]
    pub links: Vec<ProjectLink>,

    /// Border gradient; cycles through [`Accent::ALL`] when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<Accent>,
}

/// An outbound link on a project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ProjectLink {
    /// Button text
    pub label: String,
    /// Target URI
    pub href: String,
    /// Button glyph
    #[serde(default = "default_link_icon")]
    pub icon: Icon,
}

const fn default_link_icon() -> Icon {
    Icon::Github
}

/// Project card border gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    /// rose → orange → amber
    Sunset,
    /// emerald → teal → cyan
    Lagoon,
    /// violet → fuchsia → indigo
    Aurora,
}

impl Accent {
    /// Gradients in fallback order.
    pub const ALL: [Self; 3] = [Self::Sunset, Self::Lagoon, Self::Aurora];

    /// Accent for the card at `index` when none is configured.
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// CSS modifier class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Lagoon => "lagoon",
            Self::Aurora => "aurora",
        }
    }
}

/// A group of related skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SkillGroup {
    /// Category name
    pub name: String,
    /// Category glyph
    pub icon: Icon,
    /// Skills, in display order
    #[serde(default)]
    pub items: Vec<String>,
}

/// A certification card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Certification {
    /// Certificate name
    pub name: String,
    /// Issuing organization
    pub org: String,
    /// Free-form date range (e.g. "Jul – Aug 2024")
    pub date: String,
    /// Verification URI
    pub href: String,
}

// ============================================================================
// Title Cycle Timing
// ============================================================================

/// Headline typing cadence.
///
/// Durations are written in humantime form (`"100ms"`, `"1s"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct CycleTiming {
    /// Delay between revealing successive characters
    #[serde(default = "default_interval", with = "duration_str")]
    pub interval: Duration,

    /// Delay after a word is fully revealed before the next one starts
    #[serde(default = "default_pause", with = "duration_str")]
    pub pause: Duration,
}

/// Default per-character reveal interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Default pause between words.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(1000);

const fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

const fn default_pause() -> Duration {
    DEFAULT_PAUSE
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            pause: DEFAULT_PAUSE,
        }
    }
}

mod duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Glyphs available to the page.
///
/// Rendered as references into the `icons.svg` sprite shipped with the
/// asset bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Icon {
    /// Code repository mark
    Github,
    /// Professional network mark
    Linkedin,
    /// Envelope
    Mail,
    /// Angle brackets
    Code,
    /// Box with outgoing arrow
    ExternalLink,
    /// Mortarboard
    GraduationCap,
    /// Trophy
    Trophy,
    /// Paper plane
    Send,
    /// Sparkles
    Sparkles,
    /// Stacked books
    Library,
    /// Processor
    Cpu,
    /// Cylinder
    Database,
    /// Terminal window
    Terminal,
    /// Chain link
    Link,
}

impl Icon {
    /// Every icon, in sprite order.
    pub const ALL: [Self; 14] = [
        Self::Github,
        Self::Linkedin,
        Self::Mail,
        Self::Code,
        Self::ExternalLink,
        Self::GraduationCap,
        Self::Trophy,
        Self::Send,
        Self::Sparkles,
        Self::Library,
        Self::Cpu,
        Self::Database,
        Self::Terminal,
        Self::Link,
    ];

    /// Sprite symbol id.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Mail => "mail",
            Self::Code => "code",
            Self::ExternalLink => "external-link",
            Self::GraduationCap => "graduation-cap",
            Self::Trophy => "trophy",
            Self::Send => "send",
            Self::Sparkles => "sparkles",
            Self::Library => "library",
            Self::Cpu => "cpu",
            Self::Database => "database",
            Self::Terminal => "terminal",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown icon name, with the closest known name when one is similar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown icon '{value}'{}", suggestion.map_or_else(String::new, |s| format!(", did you mean '{s}'?")))]
pub struct UnknownIcon {
    /// The name that failed to parse
    pub value: String,
    /// Closest known icon name
    pub suggestion: Option<&'static str>,
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(icon) = Self::ALL.into_iter().find(|icon| icon.name() == s) {
            return Ok(icon);
        }

        let suggestion = Self::ALL
            .into_iter()
            .map(|icon| (icon.name(), strsim::jaro_winkler(s, icon.name())))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name);

        Err(UnknownIcon {
            value: s.to_string(),
            suggestion,
        })
    }
}

impl TryFrom<String> for Icon {
    type Error = UnknownIcon;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Icon> for &'static str {
    fn from(icon: Icon) -> Self {
        icon.name()
    }
}
