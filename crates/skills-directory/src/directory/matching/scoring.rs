use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::super::domain::{Profile, MAX_PROFICIENCY, MIN_PROFICIENCY};
use super::super::filter::FilterSpec;
use super::qualification::SkillLevels;

/// Points for one considered skill held at the top proficiency level.
pub const SKILL_WEIGHT: f64 = 20.0;
/// Flat credit for profiles updated within [`FRESHNESS_WINDOW_DAYS`].
pub const FRESHNESS_BONUS: f64 = 10.0;
pub const FRESHNESS_WINDOW_DAYS: i64 = 90;
pub const MAX_SCORE: u8 = 100;

/// Per-component view of a relevance score, prior to rounding and capping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skill_points: f64,
    pub matched_skills: usize,
    pub freshness_points: f64,
    pub availability_points: f64,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> f64 {
        self.skill_points + self.freshness_points + self.availability_points
    }

    /// Rounded half-up and capped at [`MAX_SCORE`].
    pub fn total(&self) -> u8 {
        let rounded = self.raw_total().round();
        if rounded >= f64::from(MAX_SCORE) {
            MAX_SCORE
        } else if rounded <= 0.0 {
            0
        } else {
            rounded as u8
        }
    }
}

/// Score a profile that already qualified for `filter`.
///
/// Contributions are summed per matched skill and are not normalized by the
/// number of skills considered, so broader matches rank higher until the cap.
pub(crate) fn score_profile(
    profile: &Profile,
    levels: &SkillLevels<'_>,
    filter: &FilterSpec,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let mut skill_points = 0.0;
    let mut matched_skills = 0;

    let mut credit = |level: u8, min_level: u8| {
        if level >= min_level {
            skill_points += f64::from(level) * SKILL_WEIGHT / f64::from(MAX_PROFICIENCY);
            matched_skills += 1;
        }
    };

    if filter.skills.is_empty() {
        for held in &profile.skills {
            credit(levels.level(&held.skill_id), MIN_PROFICIENCY);
        }
    } else {
        for requested in &filter.skills {
            credit(levels.level(&requested.skill_id), requested.min_level);
        }
    }

    let fresh = profile
        .last_updated
        .map(|updated| {
            now.signed_duration_since(updated) <= Duration::days(FRESHNESS_WINDOW_DAYS)
        })
        .unwrap_or(false);
    let freshness_points = if fresh { FRESHNESS_BONUS } else { 0.0 };

    let availability_points = f64::from(profile.availability()) / 10.0;

    ScoreBreakdown {
        skill_points,
        matched_skills,
        freshness_points,
        availability_points,
    }
}
