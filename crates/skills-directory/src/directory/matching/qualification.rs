use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::super::catalog::SkillCatalog;
use super::super::domain::{Profile, SkillCategory, SkillId};
use super::super::filter::FilterSpec;

/// Skill id -> declared level for one profile. Absent skills read as level 0;
/// a repeated id keeps its first entry, as `Profile::level_of` does.
pub(crate) struct SkillLevels<'a> {
    levels: HashMap<&'a SkillId, u8>,
}

impl<'a> SkillLevels<'a> {
    pub(crate) fn of(profile: &'a Profile) -> Self {
        let mut levels = HashMap::with_capacity(profile.skills.len());
        for skill in &profile.skills {
            levels
                .entry(&skill.skill_id)
                .or_insert(skill.proficiency_level);
        }
        Self { levels }
    }

    pub(crate) fn level(&self, skill_id: &SkillId) -> u8 {
        self.levels.get(skill_id).copied().unwrap_or(0)
    }
}

/// Filter constraints in the order the evaluator applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Skills,
    Category,
    Location,
    BusinessUnit,
    MinAvailability,
    EarliestStart,
    UpdatedWithin,
    OpenToMission,
}

impl Constraint {
    pub const fn label(self) -> &'static str {
        match self {
            Constraint::Skills => "skills",
            Constraint::Category => "category",
            Constraint::Location => "location",
            Constraint::BusinessUnit => "business unit",
            Constraint::MinAvailability => "availability",
            Constraint::EarliestStart => "earliest start",
            Constraint::UpdatedWithin => "recency",
            Constraint::OpenToMission => "open to mission",
        }
    }
}

/// First constraint a profile failed, with enough context to explain the miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Disqualification {
    MissingRequiredSkills { missing: Vec<SkillId> },
    NoRequestedSkillMatched,
    CategoryNotHeld { category: SkillCategory },
    LocationMismatch { query: String },
    BusinessUnitMismatch { query: String },
    AvailabilityBelowMinimum { required: u8, actual: u8 },
    NoEarliestStart,
    StartsTooLate { required_by: NaiveDate, earliest_start: NaiveDate },
    NoLastUpdated,
    UpdatedTooLongAgo { within_days: u32, days_since: i64 },
    MissionPreferenceMismatch { required: bool },
}

impl Disqualification {
    pub fn constraint(&self) -> Constraint {
        match self {
            Disqualification::MissingRequiredSkills { .. }
            | Disqualification::NoRequestedSkillMatched => Constraint::Skills,
            Disqualification::CategoryNotHeld { .. } => Constraint::Category,
            Disqualification::LocationMismatch { .. } => Constraint::Location,
            Disqualification::BusinessUnitMismatch { .. } => Constraint::BusinessUnit,
            Disqualification::AvailabilityBelowMinimum { .. } => Constraint::MinAvailability,
            Disqualification::NoEarliestStart | Disqualification::StartsTooLate { .. } => {
                Constraint::EarliestStart
            }
            Disqualification::NoLastUpdated | Disqualification::UpdatedTooLongAgo { .. } => {
                Constraint::UpdatedWithin
            }
            Disqualification::MissionPreferenceMismatch { .. } => Constraint::OpenToMission,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Disqualification::MissingRequiredSkills { missing } => {
                let ids: Vec<&str> = missing.iter().map(SkillId::as_str).collect();
                format!("below required level for {}", ids.join(", "))
            }
            Disqualification::NoRequestedSkillMatched => {
                "none of the requested skills at the required level".to_string()
            }
            Disqualification::CategoryNotHeld { category } => {
                format!("holds no {} skill", category.label())
            }
            Disqualification::LocationMismatch { query } => {
                format!("city or country does not match '{query}'")
            }
            Disqualification::BusinessUnitMismatch { query } => {
                format!("business unit does not match '{query}'")
            }
            Disqualification::AvailabilityBelowMinimum { required, actual } => {
                format!("available {actual}% (needs {required}%)")
            }
            Disqualification::NoEarliestStart => "no earliest start date recorded".to_string(),
            Disqualification::StartsTooLate {
                required_by,
                earliest_start,
            } => format!("starts {earliest_start}, after {required_by}"),
            Disqualification::NoLastUpdated => "profile was never updated".to_string(),
            Disqualification::UpdatedTooLongAgo {
                within_days,
                days_since,
            } => format!("last updated {days_since} days ago (limit {within_days})"),
            Disqualification::MissionPreferenceMismatch { required } => {
                if *required {
                    "not open to missions".to_string()
                } else {
                    "open to missions".to_string()
                }
            }
        }
    }
}

/// Apply every set constraint in order, stopping at the first failure.
pub(crate) fn qualify(
    profile: &Profile,
    levels: &SkillLevels<'_>,
    filter: &FilterSpec,
    catalog: &SkillCatalog,
    now: DateTime<Utc>,
) -> Result<(), Disqualification> {
    check_skills(levels, filter)?;
    check_category(profile, filter, catalog)?;
    check_location(profile, filter)?;
    check_business_unit(profile, filter)?;
    check_min_availability(profile, filter)?;
    check_earliest_start(profile, filter)?;
    check_updated_within(profile, filter, now)?;
    check_open_to_mission(profile, filter)?;
    Ok(())
}

fn check_skills(levels: &SkillLevels<'_>, filter: &FilterSpec) -> Result<(), Disqualification> {
    if filter.skills.is_empty() {
        return Ok(());
    }

    let meets = |skill_id: &SkillId, min_level: u8| levels.level(skill_id) >= min_level;

    if filter.relaxed {
        if filter
            .skills
            .iter()
            .any(|requested| meets(&requested.skill_id, requested.min_level))
        {
            Ok(())
        } else {
            Err(Disqualification::NoRequestedSkillMatched)
        }
    } else {
        let missing: Vec<SkillId> = filter
            .skills
            .iter()
            .filter(|requested| !meets(&requested.skill_id, requested.min_level))
            .map(|requested| requested.skill_id.clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Disqualification::MissingRequiredSkills { missing })
        }
    }
}

fn check_category(
    profile: &Profile,
    filter: &FilterSpec,
    catalog: &SkillCatalog,
) -> Result<(), Disqualification> {
    let Some(category) = filter.category else {
        return Ok(());
    };

    let holds = profile
        .skills
        .iter()
        .any(|skill| catalog.category_of(&skill.skill_id) == Some(category));
    if holds {
        Ok(())
    } else {
        Err(Disqualification::CategoryNotHeld { category })
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

fn check_location(profile: &Profile, filter: &FilterSpec) -> Result<(), Disqualification> {
    let Some(query) = filter.location.as_deref() else {
        return Ok(());
    };

    let needle = query.to_lowercase();
    if contains_ignore_case(profile.location_city.as_deref(), &needle)
        || contains_ignore_case(profile.location_country.as_deref(), &needle)
    {
        Ok(())
    } else {
        Err(Disqualification::LocationMismatch {
            query: query.to_string(),
        })
    }
}

fn check_business_unit(profile: &Profile, filter: &FilterSpec) -> Result<(), Disqualification> {
    let Some(query) = filter.business_unit.as_deref() else {
        return Ok(());
    };

    let unit = profile.business_unit.as_deref().unwrap_or("");
    if unit.to_lowercase().contains(&query.to_lowercase()) {
        Ok(())
    } else {
        Err(Disqualification::BusinessUnitMismatch {
            query: query.to_string(),
        })
    }
}

fn check_min_availability(profile: &Profile, filter: &FilterSpec) -> Result<(), Disqualification> {
    let Some(required) = filter.min_availability else {
        return Ok(());
    };

    let actual = profile.availability();
    if actual >= required {
        Ok(())
    } else {
        Err(Disqualification::AvailabilityBelowMinimum { required, actual })
    }
}

fn check_earliest_start(profile: &Profile, filter: &FilterSpec) -> Result<(), Disqualification> {
    let Some(required_by) = filter.earliest_start_by else {
        return Ok(());
    };

    match profile.earliest_start {
        None => Err(Disqualification::NoEarliestStart),
        Some(earliest_start) if earliest_start > required_by => {
            Err(Disqualification::StartsTooLate {
                required_by,
                earliest_start,
            })
        }
        Some(_) => Ok(()),
    }
}

fn check_updated_within(
    profile: &Profile,
    filter: &FilterSpec,
    now: DateTime<Utc>,
) -> Result<(), Disqualification> {
    let Some(within_days) = filter.updated_within_days.filter(|days| *days > 0) else {
        return Ok(());
    };

    let Some(last_updated) = profile.last_updated else {
        return Err(Disqualification::NoLastUpdated);
    };

    let elapsed = now.signed_duration_since(last_updated);
    if elapsed <= Duration::days(i64::from(within_days)) {
        Ok(())
    } else {
        Err(Disqualification::UpdatedTooLongAgo {
            within_days,
            days_since: elapsed.num_days(),
        })
    }
}

fn check_open_to_mission(profile: &Profile, filter: &FilterSpec) -> Result<(), Disqualification> {
    let Some(required) = filter.open_to_mission else {
        return Ok(());
    };

    if profile.open_to_mission.unwrap_or(false) == required {
        Ok(())
    } else {
        Err(Disqualification::MissionPreferenceMismatch { required })
    }
}
