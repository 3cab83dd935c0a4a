//! Compiled-in resume content.
//!
//! Used whenever no content file is given. Built once on first access.

use std::sync::LazyLock;

use super::schema::{
    Accent, Certification, Channel, CycleTiming, Icon, LinkSet, Profile, Project, ProjectLink,
    SiteContent, SkillGroup,
};

static BUILTIN: LazyLock<SiteContent> = LazyLock::new(build);

/// Returns the compiled-in content.
#[must_use]
pub fn builtin() -> &'static SiteContent {
    &BUILTIN
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn github(href: &str) -> Vec<ProjectLink> {
    vec![ProjectLink {
        label: "GitHub".to_string(),
        href: href.to_string(),
        icon: Icon::Github,
    }]
}

fn build() -> SiteContent {
    let links: LinkSet = [
        (Channel::Email, "mailto:akritisingh0309@gmail.com"),
        (Channel::Linkedin, "https://linkedin.com/in/akriti-singh03"),
        (Channel::Github, "https://github.com/akritiDev03"),
        (Channel::Leetcode, "https://leetcode.com/akritisingh0309/"),
    ]
    .into_iter()
    .map(|(channel, uri)| (channel, uri.to_string()))
    .collect();

    let projects = vec![
        Project {
            title: "Tetris Game".to_string(),
            description: "A classic Tetris block-stacking game built from scratch. Includes \
                keyboard controls, real-time score tracking, increasing difficulty, \
                pause/resume, and a clean responsive layout."
                .to_string(),
            tech: strings(&["HTML", "CSS", "JavaScript"]),
            links: github("https://github.com/akritiDev03/Tetris_Game"),
            accent: Some(Accent::Sunset),
        },
        Project {
            title: "LuxStay – Hotel Management System".to_string(),
            description: "Responsive booking system with secure login, dynamic room listings, \
                and session-based user authentication. Integrated with Material Icons and \
                Google Fonts for a smooth user experience."
                .to_string(),
            tech: strings(&["HTML5", "CSS3", "JavaScript", "PHP", "MySQL"]),
            links: github("https://github.com/akritiDev03/Hotel_Management"),
            accent: Some(Accent::Lagoon),
        },
        Project {
            title: "CureHaven – Hospital Management System".to_string(),
            description: "Full-stack hospital management platform with role-based \
                authentication (patient/admin) using JWT and bcrypt. Features include an admin \
                portal for managing doctors, patients, and appointments; patient dashboard for \
                booking and tracking appointments."
                .to_string(),
            tech: strings(&[
                "React.js",
                "MongoDB",
                "Express.js",
                "Node.js",
                "Cloudinary",
                "Multer",
                "JWT",
            ]),
            links: github("https://github.com/akritiDev03/CureHaven"),
            accent: Some(Accent::Aurora),
        },
    ];

    let skills = [
        ("Languages", Icon::Code, &["C++", "Java", "JavaScript"][..]),
        ("Frontend", Icon::Library, &["ReactJS", "Bootstrap"][..]),
        ("Backend", Icon::Cpu, &["Node.js", "Express.js"][..]),
        ("Databases", Icon::Database, &["MongoDB", "MySQL"][..]),
        ("Tools", Icon::Terminal, &["Git", "GitHub"][..]),
        (
            "Soft Skills",
            Icon::Sparkles,
            &["Leadership", "Communication", "Time Management", "Problem Solving"][..],
        ),
    ]
    .into_iter()
    .map(|(name, icon, items)| SkillGroup {
        name: name.to_string(),
        icon,
        items: strings(items),
    })
    .collect();

    let certifications = vec![Certification {
        name: "MERN Stack Summer Training".to_string(),
        org: "IBM".to_string(),
        date: "Jul – Aug 2024".to_string(),
        href: "https://drive.google.com/file/d/1Iffj60J030HbR7EVMXaZqmvXFAyUPvuV/view?usp=sharing"
            .to_string(),
    }];

    SiteContent {
        profile: Profile {
            name: "Akriti Singh".to_string(),
            availability: Some("Available for Internships".to_string()),
            titles: strings(&["MERN Developer", "Full-Stack Engineer", "Problem Solver"]),
            about: "Passionate MERN stack web developer with strong DSA foundation. Enjoy \
                building responsive, dynamic, and user-friendly applications. Fast learner with \
                a collaborative mindset, eager to embrace new technologies and contribute \
                effectively in dynamic team environments."
                .to_string(),
            image: "/akriti.jpg".to_string(),
            contact_blurb: "I’m open to internships and collaborations. Reach out for web \
                development projects, especially MERN stack."
                .to_string(),
            credit: Some("Built with Rust".to_string()),
        },
        links,
        projects,
        skills,
        certifications,
        title_cycle: CycleTiming::default(),
    }
}
