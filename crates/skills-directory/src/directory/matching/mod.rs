mod qualification;
mod ranking;
mod scoring;

pub use qualification::{Constraint, Disqualification};
pub use ranking::RankedProfile;
pub use scoring::{ScoreBreakdown, FRESHNESS_BONUS, FRESHNESS_WINDOW_DAYS, MAX_SCORE, SKILL_WEIGHT};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::catalog::SkillCatalog;
use super::domain::Profile;
use super::filter::FilterSpec;
use qualification::{qualify, SkillLevels};
use ranking::sort_ranked;
use scoring::score_profile;

/// Verdict for one profile. `score` is always 0 when the profile does not qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub qualifies: bool,
    pub score: u8,
}

impl MatchResult {
    pub const DISQUALIFIED: MatchResult = MatchResult {
        qualifies: false,
        score: 0,
    };

    pub fn qualified(score: u8) -> Self {
        Self {
            qualifies: true,
            score,
        }
    }
}

/// Evaluation of one profile including the reason it was left out, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment<'a> {
    pub profile: &'a Profile,
    pub outcome: Result<ScoreBreakdown, Disqualification>,
}

impl Assessment<'_> {
    pub fn result(&self) -> MatchResult {
        match &self.outcome {
            Ok(breakdown) => MatchResult::qualified(breakdown.total()),
            Err(_) => MatchResult::DISQUALIFIED,
        }
    }
}

/// Stateless filter-and-score engine.
///
/// The engine never mutates profiles and keeps no state between calls; the
/// catalog is only read to resolve skill categories.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    catalog: Arc<SkillCatalog>,
}

impl MatchingEngine {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn evaluate(
        &self,
        profile: &Profile,
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> MatchResult {
        match self.assess_one(profile, filter, now) {
            Ok(breakdown) => MatchResult::qualified(breakdown.total()),
            Err(_) => MatchResult::DISQUALIFIED,
        }
    }

    /// Qualification verdict with the first failed constraint on rejection.
    pub fn qualify(
        &self,
        profile: &Profile,
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> Result<(), Disqualification> {
        let levels = SkillLevels::of(profile);
        qualify(profile, &levels, filter, &self.catalog, now)
    }

    /// Score components for a profile, without checking qualification.
    pub fn score(
        &self,
        profile: &Profile,
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        let levels = SkillLevels::of(profile);
        score_profile(profile, &levels, filter, now)
    }

    fn assess_one(
        &self,
        profile: &Profile,
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> Result<ScoreBreakdown, Disqualification> {
        let levels = SkillLevels::of(profile);
        qualify(profile, &levels, filter, &self.catalog, now)?;
        Ok(score_profile(profile, &levels, filter, now))
    }

    /// Rank `profiles` against the current instant.
    pub fn rank<'a>(
        &self,
        profiles: &'a [Profile],
        filter: &FilterSpec,
    ) -> Vec<RankedProfile<'a>> {
        self.rank_at(profiles, filter, Utc::now())
    }

    /// Rank `profiles` with every recency check judged against `now`.
    pub fn rank_at<'a>(
        &self,
        profiles: &'a [Profile],
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> Vec<RankedProfile<'a>> {
        let mut ranked: Vec<RankedProfile<'a>> = profiles
            .par_iter()
            .filter_map(|profile| {
                let result = self.evaluate(profile, filter, now);
                result.qualifies.then_some(RankedProfile { profile, result })
            })
            .collect();

        sort_ranked(&mut ranked, filter.sort_by);

        debug!(
            pool = profiles.len(),
            qualified = ranked.len(),
            sort_by = filter.sort_by.label(),
            "ranked directory profiles"
        );

        ranked
    }

    /// Evaluate every profile, keeping disqualified ones, in pool order.
    pub fn assess_at<'a>(
        &self,
        profiles: &'a [Profile],
        filter: &FilterSpec,
        now: DateTime<Utc>,
    ) -> Vec<Assessment<'a>> {
        profiles
            .par_iter()
            .map(|profile| Assessment {
                profile,
                outcome: self.assess_one(profile, filter, now),
            })
            .collect()
    }
}
