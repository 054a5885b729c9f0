//! The built-in document the editor starts from when no seed is given.

use crate::model::{Entry, Id, PersonalInfo, ResumeDocument, Section, SectionBody, Skill};

pub fn sample_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            full_name: "Jane Doe".to_string(),
            title: Some("Backend Engineer".to_string()),
            email: "jane.doe@example.com".to_string(),
            phone: "+1 555 010 0199".to_string(),
            location: "Lisbon, Portugal".to_string(),
            linkedin: Some("linkedin.com/in/janedoe".to_string()),
            linkedin_url: Some("https://linkedin.com/in/janedoe".to_string()),
            github: Some("github.com/janedoe".to_string()),
            github_url: Some("https://github.com/janedoe".to_string()),
        },
        sections: vec![
            Section::new(
                "summary",
                "Professional Summary",
                SectionBody::Text {
                    content: "Backend engineer with six years of experience building \
                              payment and logistics services. Comfortable across the \
                              stack from database schema to on-call, with a bias for \
                              small, well-tested changes."
                        .to_string(),
                },
            ),
            Section::new(
                "experience",
                "Experience",
                SectionBody::Entries {
                    entries: vec![
                        Entry {
                            id: Id::new("1"),
                            title: "Northwind Logistics".to_string(),
                            subtitle: "Senior Backend Engineer".to_string(),
                            date: "Jun 2021 - Present".to_string(),
                            start_date: Some("2021-06".to_string()),
                            end_date: None,
                            is_current: true,
                            description: vec![
                                "Led the rewrite of the shipment tracking pipeline, cutting p99 latency by 60%.".to_string(),
                                "Mentored four engineers through their first on-call rotations.".to_string(),
                            ],
                        },
                        Entry {
                            id: Id::new("2"),
                            title: "Contoso Payments".to_string(),
                            subtitle: "Software Engineer".to_string(),
                            date: "Sep 2018 - May 2021".to_string(),
                            start_date: Some("2018-09".to_string()),
                            end_date: Some("2021-05".to_string()),
                            is_current: false,
                            description: vec![
                                "Built the reconciliation service that settles card transactions nightly.".to_string(),
                            ],
                        },
                    ],
                },
            ),
            Section::new(
                "education",
                "Education",
                SectionBody::Entries {
                    entries: vec![Entry {
                        id: Id::new("1"),
                        title: "University of Porto".to_string(),
                        subtitle: "BSc in Computer Science".to_string(),
                        date: "2014 - 2018".to_string(),
                        ..Entry::default()
                    }],
                },
            ),
            Section::new(
                "skills",
                "Skills",
                SectionBody::Skills {
                    list: vec![
                        Skill::new("Languages", "Rust, Go, Python, SQL"),
                        Skill::new("Infrastructure", "PostgreSQL, Kafka, Kubernetes, Terraform"),
                        Skill::new("Practices", "Code review, incident response, technical writing"),
                    ],
                },
            ),
            Section::new(
                "languages",
                "Languages",
                SectionBody::Skills {
                    list: vec![
                        Skill::new("Portuguese", "Native"),
                        Skill::new("English", "Fluent"),
                    ],
                },
            ),
            Section::new(
                "achievements",
                "Achievements",
                SectionBody::List {
                    items: vec![
                        "Speaker, regional Rust meetup (2023)".to_string(),
                        "Winner, internal hack week (2020)".to_string(),
                    ],
                },
            ),
        ],
    }
}
