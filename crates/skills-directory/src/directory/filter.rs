use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{SkillCategory, SkillId, MAX_PROFICIENCY, MIN_PROFICIENCY};

/// A skill the searcher requires, at or above `min_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedSkill {
    pub skill_id: SkillId,
    pub min_level: u8,
}

impl RequestedSkill {
    pub fn new(skill_id: impl Into<String>, min_level: u8) -> Self {
        Self {
            skill_id: SkillId::new(skill_id),
            min_level,
        }
    }
}

/// Ordering applied to the qualifying result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Match,
    Availability,
    Updated,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "match" | "score" => Some(Self::Match),
            "availability" => Some(Self::Availability),
            "updated" | "last_updated" => Some(Self::Updated),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Availability => "availability",
            Self::Updated => "updated",
        }
    }
}

/// Validated search constraints. Unset constraints are skipped by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub skills: Vec<RequestedSkill>,
    pub category: Option<SkillCategory>,
    pub location: Option<String>,
    pub business_unit: Option<String>,
    pub min_availability: Option<u8>,
    pub earliest_start_by: Option<NaiveDate>,
    pub updated_within_days: Option<u32>,
    pub open_to_mission: Option<bool>,
    pub relaxed: bool,
    pub sort_by: SortKey,
}

/// Filter values as submitted by a form, API client or CLI, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub skills: Vec<RequestedSkill>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub business_unit: Option<String>,
    #[serde(default)]
    pub min_availability: Option<i32>,
    #[serde(default)]
    pub earliest_start_by: Option<String>,
    #[serde(default)]
    pub updated_within_days: Option<u32>,
    #[serde(default)]
    pub open_to_mission: Option<bool>,
    #[serde(default)]
    pub relaxed: bool,
    #[serde(default)]
    pub sort_by: Option<String>,
}

impl TryFrom<FilterRequest> for FilterSpec {
    type Error = FilterError;

    fn try_from(request: FilterRequest) -> Result<Self, Self::Error> {
        validate_requested_skills(&request.skills)?;

        let category = match non_blank(request.category) {
            Some(raw) => Some(
                SkillCategory::from_label(&raw).ok_or(FilterError::UnknownCategory(raw))?,
            ),
            None => None,
        };

        let min_availability = match request.min_availability {
            Some(value) => Some(
                u8::try_from(value)
                    .ok()
                    .filter(|percent| *percent <= 100)
                    .ok_or(FilterError::AvailabilityOutOfRange(value))?,
            ),
            None => None,
        };

        let earliest_start_by = non_blank(request.earliest_start_by)
            .map(|raw| parse_filter_date(&raw))
            .transpose()?;

        let sort_by = match non_blank(request.sort_by) {
            Some(raw) => SortKey::parse(&raw).ok_or(FilterError::UnknownSortKey(raw))?,
            None => SortKey::default(),
        };

        Ok(FilterSpec {
            skills: request.skills,
            category,
            location: non_blank(request.location),
            business_unit: non_blank(request.business_unit),
            min_availability,
            earliest_start_by,
            updated_within_days: request.updated_within_days.filter(|days| *days > 0),
            open_to_mission: request.open_to_mission,
            relaxed: request.relaxed,
            sort_by,
        })
    }
}

fn validate_requested_skills(skills: &[RequestedSkill]) -> Result<(), FilterError> {
    let mut seen = HashSet::new();
    for requested in skills {
        if !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&requested.min_level) {
            return Err(FilterError::LevelOutOfRange {
                skill_id: requested.skill_id.clone(),
                level: requested.min_level,
            });
        }
        if !seen.insert(&requested.skill_id) {
            return Err(FilterError::DuplicateSkill(requested.skill_id.clone()));
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Parse a `YYYY-MM-DD` date as entered in a search form.
pub fn parse_filter_date(raw: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| FilterError::InvalidDate {
        value: raw.to_string(),
    })
}

/// Validation failures raised before a filter reaches the evaluator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("earliest_start_by '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { value: String },
    #[error("minimum level {level} for skill '{skill_id}' must be between 1 and 5")]
    LevelOutOfRange { skill_id: SkillId, level: u8 },
    #[error("skill '{0}' is requested more than once")]
    DuplicateSkill(SkillId),
    #[error("min_availability {0} must be between 0 and 100")]
    AvailabilityOutOfRange(i32),
    #[error("unknown skill category '{0}'")]
    UnknownCategory(String),
    #[error("unknown sort key '{0}' (expected match, availability or updated)")]
    UnknownSortKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_yields_unconstrained_filter() {
        let spec = FilterSpec::try_from(FilterRequest::default()).expect("valid");
        assert_eq!(spec, FilterSpec::default());
        assert_eq!(spec.sort_by, SortKey::Match);
        assert!(!spec.relaxed);
    }

    #[test]
    fn blank_text_constraints_are_treated_as_unset() {
        let spec = FilterSpec::try_from(FilterRequest {
            location: Some("   ".to_string()),
            business_unit: Some(String::new()),
            category: Some(" ".to_string()),
            earliest_start_by: Some(String::new()),
            ..FilterRequest::default()
        })
        .expect("valid");
        assert!(spec.location.is_none());
        assert!(spec.business_unit.is_none());
        assert!(spec.category.is_none());
        assert!(spec.earliest_start_by.is_none());
    }

    #[test]
    fn zero_day_recency_window_is_treated_as_unset() {
        let spec = FilterSpec::try_from(FilterRequest {
            updated_within_days: Some(0),
            ..FilterRequest::default()
        })
        .expect("valid");
        assert_eq!(spec.updated_within_days, None);

        let spec = FilterSpec::try_from(FilterRequest {
            updated_within_days: Some(30),
            ..FilterRequest::default()
        })
        .expect("valid");
        assert_eq!(spec.updated_within_days, Some(30));
    }

    #[test]
    fn rejects_unparsable_start_dates() {
        let error = FilterSpec::try_from(FilterRequest {
            earliest_start_by: Some("31/12/2025".to_string()),
            ..FilterRequest::default()
        })
        .expect_err("invalid date");
        assert_eq!(
            error,
            FilterError::InvalidDate {
                value: "31/12/2025".to_string()
            }
        );
    }

    #[test]
    fn parses_dates_and_categories() {
        let spec = FilterSpec::try_from(FilterRequest {
            earliest_start_by: Some("2025-12-31".to_string()),
            category: Some("cyber".to_string()),
            sort_by: Some("Availability".to_string()),
            ..FilterRequest::default()
        })
        .expect("valid");
        assert_eq!(spec.earliest_start_by, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(spec.category, Some(SkillCategory::Cyber));
        assert_eq!(spec.sort_by, SortKey::Availability);
    }

    #[test]
    fn rejects_levels_outside_proficiency_scale() {
        for level in [0, 6] {
            let error = FilterSpec::try_from(FilterRequest {
                skills: vec![RequestedSkill::new("python", level)],
                ..FilterRequest::default()
            })
            .expect_err("level out of range");
            assert!(matches!(error, FilterError::LevelOutOfRange { .. }));
        }
    }

    #[test]
    fn rejects_duplicate_requested_skills() {
        let error = FilterSpec::try_from(FilterRequest {
            skills: vec![
                RequestedSkill::new("python", 2),
                RequestedSkill::new("python", 4),
            ],
            ..FilterRequest::default()
        })
        .expect_err("duplicate skill");
        assert_eq!(error, FilterError::DuplicateSkill(SkillId::new("python")));
    }

    #[test]
    fn rejects_availability_outside_percent_range() {
        for value in [-10, 101] {
            let error = FilterSpec::try_from(FilterRequest {
                min_availability: Some(value),
                ..FilterRequest::default()
            })
            .expect_err("availability out of range");
            assert_eq!(error, FilterError::AvailabilityOutOfRange(value));
        }
    }

    #[test]
    fn rejects_unknown_category_and_sort_key() {
        let error = FilterSpec::try_from(FilterRequest {
            category: Some("Marketing".to_string()),
            ..FilterRequest::default()
        })
        .expect_err("unknown category");
        assert_eq!(error, FilterError::UnknownCategory("Marketing".to_string()));

        let error = FilterSpec::try_from(FilterRequest {
            sort_by: Some("alphabetical".to_string()),
            ..FilterRequest::default()
        })
        .expect_err("unknown sort key");
        assert_eq!(error, FilterError::UnknownSortKey("alphabetical".to_string()));
    }

    #[test]
    fn request_deserializes_from_sparse_json() {
        let request: FilterRequest = serde_json::from_str(
            r#"{ "skills": [{ "skill_id": "react", "min_level": 3 }], "relaxed": true }"#,
        )
        .expect("json parses");
        assert!(request.relaxed);
        assert_eq!(request.skills, vec![RequestedSkill::new("react", 3)]);
        assert!(request.sort_by.is_none());
    }
}
