use std::collections::BTreeMap;

use super::entities::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProfileDocument, ProjectCategory,
    ProjectEntry, SkillCategory, SkillItem,
};

fn skill(id: &str, name: &str, level: i32) -> SkillItem {
    SkillItem {
        id: id.to_string(),
        name: name.to_string(),
        level,
    }
}

/// Built-in content shown until a stored document exists, and the fallback for any
/// field a stored document does not carry.
pub fn default_profile() -> ProfileDocument {
    let socials = BTreeMap::from([
        (
            "github".to_string(),
            "https://github.com/alexmorgan".to_string(),
        ),
        (
            "linkedin".to_string(),
            "https://www.linkedin.com/in/alexmorgan/".to_string(),
        ),
    ]);

    ProfileDocument {
        name: "Alex Morgan".to_string(),
        title: "Integration Engineer & Backend Developer".to_string(),
        brand_name: "AlexDev".to_string(),
        bio: "Backend developer focused on API platforms, middleware integration and \
              reliable web applications."
            .to_string(),
        email: "hello@alexmorgan.dev".to_string(),
        phone: "+1 555 0100".to_string(),
        location: "Remote".to_string(),
        photo_url: String::new(),
        socials,
        skills: vec![
            SkillCategory {
                id: "cat1".to_string(),
                title: "Middleware & API".to_string(),
                items: vec![
                    skill("s1", "API Gateways", 90),
                    skill("s2", "Message Brokers", 80),
                ],
            },
            SkillCategory {
                id: "cat2".to_string(),
                title: "Development Stack".to_string(),
                items: vec![skill("s3", "Rust", 85), skill("s4", "TypeScript", 80)],
            },
            SkillCategory {
                id: "cat3".to_string(),
                title: "Data & Infrastructure".to_string(),
                items: vec![skill("s5", "PostgreSQL", 80), skill("s6", "Cloud", 70)],
            },
        ],
        education: vec![EducationEntry {
            id: "edu1".to_string(),
            institution: "State University".to_string(),
            degree: "Bachelor of Information Technology".to_string(),
            duration: "2015 - 2019".to_string(),
            location: "Springfield".to_string(),
        }],
        experiences: vec![
            ExperienceEntry {
                id: "1".to_string(),
                company: "Northwind Bank".to_string(),
                role: "API Platform Engineer".to_string(),
                duration: "2023 - Present".to_string(),
                description: "Runs the public API platform for retail banking services."
                    .to_string(),
                employment_type: "Internal".to_string(),
            },
            ExperienceEntry {
                id: "2".to_string(),
                company: "Contoso Consulting".to_string(),
                role: "Integration Developer".to_string(),
                duration: "2019 - 2023".to_string(),
                description: "Delivered B2B integrations for enterprise clients.".to_string(),
                employment_type: "Vendor".to_string(),
            },
        ],
        projects: vec![
            ProjectEntry {
                id: "p1".to_string(),
                title: "Court Booking System".to_string(),
                kind: "Web Application".to_string(),
                category: ProjectCategory::Personal,
                image_url: String::new(),
                tech_front: "HTML + Tailwind".to_string(),
                tech_back: "REST API".to_string(),
                tech_db: "MySQL".to_string(),
                link: "#".to_string(),
                status: "Private Deployment".to_string(),
                description: "Booking platform with real-time court availability.".to_string(),
            },
            ProjectEntry {
                id: "p2".to_string(),
                title: "API Gateway Integration".to_string(),
                kind: "Middleware Solution".to_string(),
                category: ProjectCategory::Official,
                image_url: String::new(),
                tech_front: "React Dashboard".to_string(),
                tech_back: "API Gateway".to_string(),
                tech_db: "Oracle DB".to_string(),
                link: "#".to_string(),
                status: "Completed".to_string(),
                description: "Enterprise API gateway for secure financial transactions."
                    .to_string(),
            },
        ],
        certifications: vec![CertificationEntry {
            id: "c1".to_string(),
            name: "Cloud Practitioner".to_string(),
            issuer: "Cloud Academy".to_string(),
            year: "2022".to_string(),
            color: Some("from-orange-500/20 to-orange-600/20".to_string()),
            credential_url: "#".to_string(),
        }],
    }
}
