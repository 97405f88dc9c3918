use serde::Serialize;

use super::super::domain::Profile;
use super::super::filter::SortKey;
use super::MatchResult;

/// A qualifying profile paired with its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProfile<'a> {
    pub profile: &'a Profile,
    #[serde(rename = "match")]
    pub result: MatchResult,
}

/// Stable descending sort; ties keep their pool order.
pub(crate) fn sort_ranked(ranked: &mut [RankedProfile<'_>], key: SortKey) {
    match key {
        SortKey::Match => ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score)),
        SortKey::Availability => {
            ranked.sort_by(|a, b| b.profile.availability().cmp(&a.profile.availability()))
        }
        // `None` orders before any timestamp, so profiles never updated sink to the end.
        SortKey::Updated => {
            ranked.sort_by(|a, b| b.profile.last_updated.cmp(&a.profile.last_updated))
        }
    }
}
