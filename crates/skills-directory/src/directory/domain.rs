use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lowest proficiency a profile can declare for a skill.
pub const MIN_PROFICIENCY: u8 = 1;
/// Highest proficiency a profile can declare for a skill.
pub const MAX_PROFICIENCY: u8 = 5;

/// Catalog-unique skill identifier, e.g. `kubernetes` or `azure-devops`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for directory profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category tag grouping catalog skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "Data/AI")]
    DataAi,
    #[serde(rename = "Cyber")]
    Cyber,
    #[serde(rename = "Cloud/Infra")]
    CloudInfra,
    #[serde(rename = "Web")]
    Web,
    #[serde(rename = "Embedded")]
    Embedded,
    #[serde(rename = "PM/BA")]
    PmBa,
    #[serde(rename = "QA")]
    Qa,
    #[serde(rename = "Other")]
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 8] = [
        SkillCategory::DataAi,
        SkillCategory::Cyber,
        SkillCategory::CloudInfra,
        SkillCategory::Web,
        SkillCategory::Embedded,
        SkillCategory::PmBa,
        SkillCategory::Qa,
        SkillCategory::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SkillCategory::DataAi => "Data/AI",
            SkillCategory::Cyber => "Cyber",
            SkillCategory::CloudInfra => "Cloud/Infra",
            SkillCategory::Web => "Web",
            SkillCategory::Embedded => "Embedded",
            SkillCategory::PmBa => "PM/BA",
            SkillCategory::Qa => "QA",
            SkillCategory::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }
}

/// Catalog entry. Only active skills can be selected by filters or editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A skill held by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSkill {
    pub skill_id: SkillId,
    pub proficiency_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_note: Option<String>,
}

impl ProfileSkill {
    pub fn new(skill_id: impl Into<String>, proficiency_level: u8) -> Self {
        Self {
            skill_id: SkillId::new(skill_id),
            proficiency_level,
            years_experience: None,
            last_used: None,
            certified: None,
            evidence_note: None,
        }
    }
}

/// Directory entry describing one person. The matching engine only reads profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_percent: Option<u8>,
    #[serde(
        default,
        rename = "availability_earliest_start",
        skip_serializing_if = "Option::is_none"
    )]
    pub earliest_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_to_mission: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: Vec<ProfileSkill>,
}

impl Profile {
    /// Declared level for a skill, or 0 when the profile does not hold it.
    pub fn level_of(&self, skill_id: &SkillId) -> u8 {
        self.skills
            .iter()
            .find(|skill| &skill.skill_id == skill_id)
            .map(|skill| skill.proficiency_level)
            .unwrap_or(0)
    }

    pub fn availability(&self) -> u8 {
        self.availability_percent.unwrap_or(0)
    }

    /// `"city, country"` with missing parts left empty.
    pub fn location_label(&self) -> String {
        format!(
            "{}, {}",
            self.location_city.as_deref().unwrap_or(""),
            self.location_country.as_deref().unwrap_or("")
        )
    }
}
