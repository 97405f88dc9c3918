use chrono::{DateTime, Duration, Utc};

use super::catalog::{skill_id_for, slug};
use super::domain::{Profile, ProfileId, ProfileSkill, MAX_PROFICIENCY};

struct SeedProfile {
    full_name: &'static str,
    job_title: &'static str,
    business_unit: &'static str,
    city: &'static str,
    country: &'static str,
    languages: &'static [&'static str],
    availability_percent: u8,
    open_to_mission: bool,
    updated_days_ago: i64,
    starts_in_days: i64,
    skills: &'static [&'static str],
}

const SEED: &[SeedProfile] = &[
    SeedProfile {
        full_name: "Alice Johnson",
        job_title: "Senior Data Scientist",
        business_unit: "Analytics",
        city: "Berlin",
        country: "DE",
        languages: &["EN", "DE"],
        availability_percent: 60,
        open_to_mission: true,
        updated_days_ago: 20,
        starts_in_days: 0,
        skills: &["Python", "Pandas", "scikit-learn", "SQL", "TensorFlow", "Azure ML"],
    },
    SeedProfile {
        full_name: "Bob Smith",
        job_title: "Cloud Engineer",
        business_unit: "Platform",
        city: "Paris",
        country: "FR",
        languages: &["EN", "FR"],
        availability_percent: 80,
        open_to_mission: false,
        updated_days_ago: 120,
        starts_in_days: 14,
        skills: &[
            "Azure Core",
            "Terraform",
            "Kubernetes",
            "Docker",
            "Monitoring (AppInsights)",
        ],
    },
    SeedProfile {
        full_name: "Carol Lee",
        job_title: "Fullstack Developer",
        business_unit: "Web Apps",
        city: "London",
        country: "UK",
        languages: &["EN"],
        availability_percent: 40,
        open_to_mission: true,
        updated_days_ago: 5,
        starts_in_days: 0,
        skills: &["TypeScript", "React", "Node.js", "PostgreSQL", "REST APIs"],
    },
    SeedProfile {
        full_name: "David Kim",
        job_title: "Frontend Engineer",
        business_unit: "Web Apps",
        city: "Seoul",
        country: "KR",
        languages: &["EN", "KO"],
        availability_percent: 70,
        open_to_mission: true,
        updated_days_ago: 14,
        starts_in_days: 0,
        skills: &["JavaScript", "React", "GraphQL", "Cypress", "Playwright"],
    },
    SeedProfile {
        full_name: "Elena Garcia",
        job_title: "Cybersecurity Analyst",
        business_unit: "Security",
        city: "Madrid",
        country: "ES",
        languages: &["ES", "EN"],
        availability_percent: 50,
        open_to_mission: true,
        updated_days_ago: 30,
        starts_in_days: 0,
        skills: &[
            "ISO 27001",
            "SOC 2",
            "IAM",
            "Microsoft Sentinel",
            "Incident Response",
        ],
    },
    SeedProfile {
        full_name: "Faisal Khan",
        job_title: "ML Engineer",
        business_unit: "AI Lab",
        city: "Dubai",
        country: "AE",
        languages: &["EN", "AR"],
        availability_percent: 90,
        open_to_mission: true,
        updated_days_ago: 10,
        starts_in_days: 0,
        skills: &["MLOps", "MLflow", "Databricks", "Spark", "Vector DBs"],
    },
    SeedProfile {
        full_name: "Giulia Rossi",
        job_title: "Backend Developer",
        business_unit: "Web Platform",
        city: "Rome",
        country: "IT",
        languages: &["IT", "EN"],
        availability_percent: 30,
        open_to_mission: false,
        updated_days_ago: 45,
        starts_in_days: 0,
        skills: &["Java Spring", "REST APIs", "PostgreSQL", "Redis", "OAuth/OIDC"],
    },
    SeedProfile {
        full_name: "Hugo Martin",
        job_title: "DevOps Engineer",
        business_unit: "Platform",
        city: "Lyon",
        country: "FR",
        languages: &["FR", "EN"],
        availability_percent: 100,
        open_to_mission: true,
        updated_days_ago: 2,
        starts_in_days: 0,
        skills: &["Azure DevOps", "CI/CD", "Docker", "Kubernetes", "Terraform"],
    },
    SeedProfile {
        full_name: "Ines Lopez",
        job_title: "Product Manager",
        business_unit: "Digital",
        city: "Lisbon",
        country: "PT",
        languages: &["PT", "EN"],
        availability_percent: 20,
        open_to_mission: false,
        updated_days_ago: 90,
        starts_in_days: 0,
        skills: &[
            "Agile Scrum",
            "Roadmapping",
            "Stakeholder Mgmt",
            "Jira",
            "Requirements",
        ],
    },
    SeedProfile {
        full_name: "Jonas Müller",
        job_title: "QA Engineer",
        business_unit: "Quality",
        city: "Munich",
        country: "DE",
        languages: &["DE", "EN"],
        availability_percent: 60,
        open_to_mission: true,
        updated_days_ago: 7,
        starts_in_days: 0,
        skills: &[
            "Test Automation",
            "Playwright",
            "API Testing",
            "ISTQB",
            "Performance Testing",
        ],
    },
    SeedProfile {
        full_name: "Karin Svensson",
        job_title: "UX-minded Frontend Dev",
        business_unit: "Web",
        city: "Stockholm",
        country: "SE",
        languages: &["SV", "EN"],
        availability_percent: 50,
        open_to_mission: true,
        updated_days_ago: 21,
        starts_in_days: 0,
        skills: &["TypeScript", "React", "GraphQL", "Cypress", "REST APIs"],
    },
    SeedProfile {
        full_name: "Liam O'Connor",
        job_title: ".NET Developer",
        business_unit: "Web",
        city: "Dublin",
        country: "IE",
        languages: &["EN"],
        availability_percent: 40,
        open_to_mission: true,
        updated_days_ago: 60,
        starts_in_days: 0,
        skills: &[
            ".NET (ASP.NET Core)",
            "REST APIs",
            "Azure Functions",
            "APIM",
            "SQL",
        ],
    },
    SeedProfile {
        full_name: "Mia Nguyen",
        job_title: "Data Engineer",
        business_unit: "Analytics",
        city: "Hanoi",
        country: "VN",
        languages: &["VI", "EN"],
        availability_percent: 80,
        open_to_mission: true,
        updated_days_ago: 12,
        starts_in_days: 0,
        skills: &["Data Engineering", "Spark", "Python", "SQL", "Azure Core"],
    },
    SeedProfile {
        full_name: "Noah Brown",
        job_title: "Security Engineer",
        business_unit: "Security",
        city: "Austin",
        country: "US",
        languages: &["EN"],
        availability_percent: 70,
        open_to_mission: false,
        updated_days_ago: 28,
        starts_in_days: 0,
        skills: &[
            "Threat Modeling",
            "DevSecOps",
            "Secure SDLC",
            "Cloud Security (Azure)",
            "PAM",
        ],
    },
    SeedProfile {
        full_name: "Olivia Perez",
        job_title: "QA Lead",
        business_unit: "Quality",
        city: "Mexico City",
        country: "MX",
        languages: &["ES", "EN"],
        availability_percent: 60,
        open_to_mission: true,
        updated_days_ago: 8,
        starts_in_days: 0,
        skills: &[
            "Test Strategy",
            "Selenium",
            "Unit/Integration/E2E",
            "API Testing",
            "Cypress",
        ],
    },
    SeedProfile {
        full_name: "Pedro Silva",
        job_title: "Cloud Architect",
        business_unit: "Platform",
        city: "Porto",
        country: "PT",
        languages: &["PT", "EN"],
        availability_percent: 30,
        open_to_mission: true,
        updated_days_ago: 18,
        starts_in_days: 0,
        skills: &[
            "Azure Core",
            "Kubernetes",
            "Networking",
            "Windows Server",
            "Linux Admin",
        ],
    },
    SeedProfile {
        full_name: "Qin Wang",
        job_title: "AI Researcher",
        business_unit: "AI Lab",
        city: "Shanghai",
        country: "CN",
        languages: &["ZH", "EN"],
        availability_percent: 50,
        open_to_mission: true,
        updated_days_ago: 3,
        starts_in_days: 0,
        skills: &[
            "LLM Fine-tuning",
            "Prompt Engineering",
            "LangChain",
            "Vector DBs",
            "PyTorch",
        ],
    },
    SeedProfile {
        full_name: "Riya Patel",
        job_title: "Business Analyst",
        business_unit: "Digital",
        city: "Mumbai",
        country: "IN",
        languages: &["HI", "EN"],
        availability_percent: 40,
        open_to_mission: false,
        updated_days_ago: 75,
        starts_in_days: 0,
        skills: &[
            "Requirements",
            "Stakeholder Mgmt",
            "Kanban",
            "Confluence",
            "Agile Scrum",
        ],
    },
    SeedProfile {
        full_name: "Sara Ahmed",
        job_title: "Fullstack Engineer",
        business_unit: "Web",
        city: "Cairo",
        country: "EG",
        languages: &["AR", "EN"],
        availability_percent: 90,
        open_to_mission: true,
        updated_days_ago: 1,
        starts_in_days: 0,
        skills: &["JavaScript", "React", "Node.js", "PostgreSQL", "Microservices"],
    },
    SeedProfile {
        full_name: "Tom Becker",
        job_title: "SRE",
        business_unit: "Platform",
        city: "Zurich",
        country: "CH",
        languages: &["DE", "EN"],
        availability_percent: 70,
        open_to_mission: true,
        updated_days_ago: 34,
        starts_in_days: 0,
        skills: &[
            "Monitoring (AppInsights)",
            "CI/CD",
            "Docker",
            "Kubernetes",
            "Terraform",
        ],
    },
    SeedProfile {
        full_name: "Ugo Dubois",
        job_title: "Pentester",
        business_unit: "Security",
        city: "Brussels",
        country: "BE",
        languages: &["FR", "EN"],
        availability_percent: 20,
        open_to_mission: false,
        updated_days_ago: 55,
        starts_in_days: 0,
        skills: &[
            "Pen Testing",
            "EDR",
            "Incident Response",
            "SOC 2",
            "ISO 27001",
        ],
    },
];

/// Demonstration pool with dates anchored on `now`.
///
/// Skill levels cycle 3, 4, 5 through each profile's list so every seeded
/// profile holds a spread of proficiencies against the standard catalog.
pub fn sample_profiles(now: DateTime<Utc>) -> Vec<Profile> {
    SEED.iter().map(|seed| seed.build(now)).collect()
}

impl SeedProfile {
    fn build(&self, now: DateTime<Utc>) -> Profile {
        let id = slug(self.full_name);
        let skills = self
            .skills
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let level = (3 + (index % 3) as u8).min(MAX_PROFICIENCY);
                let mut skill = ProfileSkill::new(skill_id_for(name).0, level);
                skill.years_experience = Some(1 + (index % 6) as u8);
                skill
            })
            .collect();

        Profile {
            email: format!("{id}@example.com"),
            id: ProfileId(id),
            full_name: self.full_name.to_string(),
            job_title: Some(self.job_title.to_string()),
            business_unit: Some(self.business_unit.to_string()),
            location_city: Some(self.city.to_string()),
            location_country: Some(self.country.to_string()),
            languages: self.languages.iter().map(|lang| lang.to_string()).collect(),
            availability_percent: Some(self.availability_percent),
            earliest_start: Some((now + Duration::days(self.starts_in_days)).date_naive()),
            availability_notes: None,
            open_to_mission: Some(self.open_to_mission),
            last_updated: Some(now - Duration::days(self.updated_days_ago)),
            skills,
        }
    }
}
