use super::common::*;
use crate::directory::domain::{Profile, ProfileId};
use crate::directory::filter::{FilterSpec, SortKey};
use crate::directory::matching::RankedProfile;
use crate::directory::sample::sample_profiles;

fn ids(ranked: &[RankedProfile<'_>]) -> Vec<String> {
    ranked
        .iter()
        .map(|entry| entry.profile.id.0.clone())
        .collect()
}

fn sorted_by(key: SortKey) -> FilterSpec {
    FilterSpec {
        sort_by: key,
        ..FilterSpec::default()
    }
}

#[test]
fn availability_sort_orders_highest_first() {
    let pool = vec![
        with_availability(profile("forty", &[]), Some(40)),
        with_availability(profile("ninety", &[]), Some(90)),
        with_availability(profile("seventy", &[]), Some(70)),
    ];

    let ranked = engine().rank_at(&pool, &sorted_by(SortKey::Availability), now());
    assert_eq!(ids(&ranked), vec!["ninety", "seventy", "forty"]);
}

#[test]
fn match_sort_orders_by_score() {
    let pool = vec![
        profile("junior", &[("a", 3)]),
        profile("senior", &[("a", 5)]),
        profile("mid", &[("a", 4)]),
    ];
    let filter = skills_filter(&[("a", 3)], false);

    let ranked = engine().rank_at(&pool, &filter, now());
    assert_eq!(ids(&ranked), vec!["senior", "mid", "junior"]);
    let scores: Vec<u8> = ranked.iter().map(|entry| entry.result.score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn updated_sort_puts_missing_timestamps_last() {
    let pool = vec![
        with_last_updated(profile("never", &[]), None),
        with_last_updated(profile("old", &[]), Some(days_ago(200))),
        with_last_updated(profile("recent", &[]), Some(days_ago(1))),
    ];

    let ranked = engine().rank_at(&pool, &sorted_by(SortKey::Updated), now());
    assert_eq!(ids(&ranked), vec!["recent", "old", "never"]);
}

#[test]
fn ties_keep_pool_order() {
    let pool: Vec<Profile> = ["first", "second", "third", "fourth"]
        .iter()
        .map(|id| profile(id, &[("a", 4)]))
        .collect();

    for key in [SortKey::Match, SortKey::Availability, SortKey::Updated] {
        let ranked = engine().rank_at(&pool, &sorted_by(key), now());
        assert_eq!(ids(&ranked), vec!["first", "second", "third", "fourth"]);
    }
}

#[test]
fn ranking_only_keeps_qualifiers_with_their_evaluations() {
    let engine = engine();
    let pool = sample_profiles(now());
    let filter = skills_filter(&[("kubernetes", 4)], false);

    let ranked = engine.rank_at(&pool, &filter, now());
    assert!(!ranked.is_empty());
    for entry in &ranked {
        assert_eq!(entry.result, engine.evaluate(entry.profile, &filter, now()));
        assert!(entry.result.qualifies);
    }

    let expected = pool
        .iter()
        .filter(|candidate| engine.evaluate(candidate, &filter, now()).qualifies)
        .count();
    assert_eq!(ranked.len(), expected);
}

#[test]
fn repeated_ranking_is_deterministic() {
    let engine = engine();
    let pool = sample_profiles(now());
    let filter = FilterSpec {
        updated_within_days: Some(60),
        ..FilterSpec::default()
    };

    let first = engine.rank_at(&pool, &filter, now());
    let second = engine.rank_at(&pool, &filter, now());
    assert_eq!(first, second);
}

#[test]
fn assessments_cover_the_whole_pool_in_order() {
    let engine = engine();
    let pool = vec![
        profile("keeps", &[("a", 4)]),
        profile("drops", &[("b", 4)]),
    ];
    let filter = skills_filter(&[("a", 3)], false);

    let assessments = engine.assess_at(&pool, &filter, now());
    assert_eq!(assessments.len(), 2);
    assert_eq!(assessments[0].profile.id, ProfileId("keeps".to_string()));
    assert!(assessments[0].outcome.is_ok());
    assert!(!assessments[1].result().qualifies);
}
