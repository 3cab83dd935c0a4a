//! Site content validation
//!
//! Checks loaded content for mistakes serde cannot catch: empty names, link
//! URIs with the wrong scheme, a zero typing interval. Every problem is
//! collected rather than stopping at the first one.

use std::collections::HashSet;

use url::Url;

use crate::content::{Channel, SiteContent};
use crate::error::{Severity, ValidationIssue};

/// Outcome of validating a [`SiteContent`].
#[derive(Debug, Default, Clone)]
pub struct ValidationResult {
    /// Problems that prevent the content from being used
    pub errors: Vec<ValidationIssue>,
    /// Likely mistakes that still render
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Whether no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors followed by warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }
}

/// Validates site content.
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `content`, consuming the validator.
    #[must_use]
    pub fn validate(mut self, content: &SiteContent) -> ValidationResult {
        self.check_profile(content);
        self.check_links(content);
        self.check_projects(content);
        self.check_skills(content);
        self.check_certifications(content);
        self.check_title_cycle(content);
        self.result
    }

    fn check_profile(&mut self, content: &SiteContent) {
        let profile = &content.profile;
        if profile.name.trim().is_empty() {
            self.result
                .push(ValidationIssue::error("profile.name", "name is empty"));
        }
        if profile.titles.is_empty() {
            self.result.push(ValidationIssue::warning(
                "profile.titles",
                "no titles; the headline will not animate",
            ));
        }
        for (i, title) in profile.titles.iter().enumerate() {
            if title.is_empty() {
                self.result.push(ValidationIssue::warning(
                    format!("profile.titles[{i}]"),
                    "title is empty",
                ));
            }
        }
        if profile.image.trim().is_empty() {
            self.result.push(ValidationIssue::warning(
                "profile.image",
                "no profile image path",
            ));
        }
    }

    fn check_links(&mut self, content: &SiteContent) {
        for channel in Channel::ALL {
            let path = format!("links.{}", channel_key(channel));
            match content.links.get(channel) {
                None => self.result.push(ValidationIssue::warning(
                    path,
                    format!("no {} link; it will be omitted", channel.label()),
                )),
                Some(uri) if channel == Channel::Email => {
                    self.check_uri(&path, uri, &["mailto"]);
                }
                Some(uri) => self.check_uri(&path, uri, &["http", "https"]),
            }
        }
    }

    fn check_projects(&mut self, content: &SiteContent) {
        let mut seen = HashSet::new();
        for (i, project) in content.projects.iter().enumerate() {
            let base = format!("projects[{i}]");
            if project.title.trim().is_empty() {
                self.result
                    .push(ValidationIssue::error(format!("{base}.title"), "title is empty"));
            } else if !seen.insert(project.title.as_str()) {
                self.result.push(ValidationIssue::error(
                    format!("{base}.title"),
                    format!("duplicate project title '{}'", project.title),
                ));
            }
            for (j, link) in project.links.iter().enumerate() {
                let path = format!("{base}.links[{j}]");
                if link.label.trim().is_empty() {
                    self.result.push(ValidationIssue::warning(
                        format!("{path}.label"),
                        "link label is empty",
                    ));
                }
                self.check_uri(&format!("{path}.href"), &link.href, &["http", "https"]);
            }
        }
    }

    fn check_skills(&mut self, content: &SiteContent) {
        for (i, group) in content.skills.iter().enumerate() {
            if group.name.trim().is_empty() {
                self.result.push(ValidationIssue::error(
                    format!("skills[{i}].name"),
                    "group name is empty",
                ));
            }
            if group.items.is_empty() {
                self.result.push(ValidationIssue::warning(
                    format!("skills[{i}].items"),
                    "group has no skills",
                ));
            }
        }
    }

    fn check_certifications(&mut self, content: &SiteContent) {
        for (i, cert) in content.certifications.iter().enumerate() {
            let base = format!("certifications[{i}]");
            if cert.name.trim().is_empty() {
                self.result
                    .push(ValidationIssue::error(format!("{base}.name"), "name is empty"));
            }
            self.check_uri(&format!("{base}.href"), &cert.href, &["http", "https"]);
        }
    }

    fn check_title_cycle(&mut self, content: &SiteContent) {
        if content.title_cycle.interval.is_zero() {
            self.result.push(ValidationIssue::error(
                "title_cycle.interval",
                "interval must be greater than zero",
            ));
        }
    }

    fn check_uri(&mut self, path: &str, uri: &str, schemes: &[&str]) {
        match Url::parse(uri) {
            Ok(url) if schemes.contains(&url.scheme()) => {}
            Ok(url) => self.result.push(ValidationIssue::error(
                path,
                format!(
                    "unsupported scheme '{}' (expected {})",
                    url.scheme(),
                    schemes.join(" or ")
                ),
            )),
            Err(e) => self
                .result
                .push(ValidationIssue::error(path, format!("invalid URI '{uri}': {e}"))),
        }
    }
}

const fn channel_key(channel: Channel) -> &'static str {
    match channel {
        Channel::Email => "email",
        Channel::Github => "github",
        Channel::Linkedin => "linkedin",
        Channel::Leetcode => "leetcode",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::content::{Certification, LinkSet, Project, ProjectLink, builtin};

    fn paths(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn test_builtin_content_is_clean() {
        let result = Validator::new().validate(builtin());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_email_requires_mailto() {
        let mut content = builtin().clone();
        content.links = [(Channel::Email, "https://mail.example.com".to_string())]
            .into_iter()
            .collect();
        let result = Validator::new().validate(&content);
        assert_eq!(paths(&result.errors), vec!["links.email"]);
        assert!(result.errors[0].message.contains("'https'"));
    }

    #[test]
    fn test_missing_channels_warn() {
        let mut content = builtin().clone();
        content.links = LinkSet::default();
        let result = Validator::new().validate(&content);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), Channel::ALL.len());
    }

    #[test]
    fn test_bad_project_link_and_duplicate_title() {
        let mut content = builtin().clone();
        let mut dup = content.projects[0].clone();
        dup.links = vec![ProjectLink {
            label: String::new(),
            href: "not a url".to_string(),
            icon: crate::content::Icon::Github,
        }];
        content.projects.push(dup);
        let result = Validator::new().validate(&content);
        assert_eq!(
            paths(&result.errors),
            vec!["projects[3].title", "projects[3].links[0].href"]
        );
        assert_eq!(paths(&result.warnings), vec!["projects[3].links[0].label"]);
    }

    #[test]
    fn test_empty_titles_warn_not_error() {
        let mut content = builtin().clone();
        content.profile.titles.clear();
        let result = Validator::new().validate(&content);
        assert!(result.is_valid());
        assert_eq!(paths(&result.warnings), vec!["profile.titles"]);
    }

    #[test]
    fn test_zero_interval_is_error() {
        let mut content = builtin().clone();
        content.title_cycle.interval = Duration::ZERO;
        let result = Validator::new().validate(&content);
        assert_eq!(paths(&result.errors), vec!["title_cycle.interval"]);
    }

    #[test]
    fn test_empty_names_are_errors() {
        let mut content = builtin().clone();
        content.profile.name = "  ".to_string();
        content.projects = vec![Project {
            title: String::new(),
            description: String::new(),
            tech: vec![],
            links: vec![],
            accent: None,
        }];
        content.certifications = vec![Certification {
            name: String::new(),
            org: "IBM".to_string(),
            date: "2024".to_string(),
            href: "ftp://files.example.com/cert".to_string(),
        }];
        let result = Validator::new().validate(&content);
        assert_eq!(
            paths(&result.errors),
            vec![
                "profile.name",
                "projects[0].title",
                "certifications[0].name",
                "certifications[0].href",
            ]
        );
    }

    #[test]
    fn test_issues_lists_errors_first() {
        let mut content = builtin().clone();
        content.profile.titles = vec![String::new()];
        content.title_cycle.interval = Duration::ZERO;
        let result = Validator::new().validate(&content);
        let severities: Vec<Severity> = result.issues().map(|i| i.severity).collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
    }
}
