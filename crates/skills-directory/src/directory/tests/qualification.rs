use super::common::*;
use crate::directory::domain::{SkillCategory, SkillId};
use crate::directory::filter::{FilterRequest, FilterSpec, RequestedSkill};
use crate::directory::matching::{Constraint, Disqualification, MatchResult};
use crate::directory::sample::sample_profiles;
use chrono::Duration;

#[test]
fn strict_mode_requires_every_requested_skill() {
    let engine = engine();
    let filter = skills_filter(&[("a", 3), ("b", 4)], false);

    let both = profile("both", &[("a", 3), ("b", 4)]);
    let short_on_b = profile("short-on-b", &[("a", 3), ("b", 3)]);

    assert!(engine.evaluate(&both, &filter, now()).qualifies);
    assert_eq!(
        engine.qualify(&short_on_b, &filter, now()),
        Err(Disqualification::MissingRequiredSkills {
            missing: vec![SkillId::new("b")]
        })
    );
}

#[test]
fn relaxed_mode_accepts_any_requested_skill() {
    let engine = engine();
    let filter = skills_filter(&[("a", 3), ("b", 4)], true);

    let only_a = profile("only-a", &[("a", 3), ("b", 3)]);
    let only_b = profile("only-b", &[("a", 2), ("b", 4)]);
    let neither = profile("neither", &[("a", 2), ("b", 3)]);

    assert!(engine.evaluate(&only_a, &filter, now()).qualifies);
    assert!(engine.evaluate(&only_b, &filter, now()).qualifies);
    assert_eq!(
        engine.qualify(&neither, &filter, now()),
        Err(Disqualification::NoRequestedSkillMatched)
    );
}

#[test]
fn empty_skill_list_passes_in_both_modes() {
    let engine = engine();
    let bare = profile("bare", &[]);

    for relaxed in [false, true] {
        let filter = skills_filter(&[], relaxed);
        assert!(engine.evaluate(&bare, &filter, now()).qualifies);
    }
}

#[test]
fn skills_a_profile_does_not_hold_read_as_level_zero() {
    let engine = engine();
    let filter = skills_filter(&[("missing", 1)], false);
    let holder = profile("holder", &[("present", 5)]);

    assert_eq!(
        engine.evaluate(&holder, &filter, now()),
        MatchResult::DISQUALIFIED
    );
}

#[test]
fn category_requires_a_held_skill_in_that_category() {
    let engine = engine();
    let analyst = profile("analyst", &[("python", 2), ("sql", 3)]);

    let data = FilterSpec {
        category: Some(SkillCategory::DataAi),
        ..FilterSpec::default()
    };
    let cyber = FilterSpec {
        category: Some(SkillCategory::Cyber),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&analyst, &data, now()).qualifies);
    assert_eq!(
        engine.qualify(&analyst, &cyber, now()),
        Err(Disqualification::CategoryNotHeld {
            category: SkillCategory::Cyber
        })
    );
}

#[test]
fn location_matches_city_or_country_case_insensitively() {
    let engine = engine();
    let berlin = profile("berlin", &[]);
    let filter = |query: &str| FilterSpec {
        location: Some(query.to_string()),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&berlin, &filter("BERL"), now()).qualifies);
    assert!(engine.evaluate(&berlin, &filter("de"), now()).qualifies);
    assert!(!engine.evaluate(&berlin, &filter("paris"), now()).qualifies);

    let mut nowhere = profile("nowhere", &[]);
    nowhere.location_city = None;
    nowhere.location_country = None;
    assert_eq!(
        engine.qualify(&nowhere, &filter("de"), now()),
        Err(Disqualification::LocationMismatch {
            query: "de".to_string()
        })
    );
}

#[test]
fn missing_business_unit_fails_a_unit_query() {
    let engine = engine();
    let filter = FilterSpec {
        business_unit: Some("analytic".to_string()),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&profile("in-unit", &[]), &filter, now()).qualifies);

    let mut unassigned = profile("unassigned", &[]);
    unassigned.business_unit = None;
    assert!(!engine.evaluate(&unassigned, &filter, now()).qualifies);
}

#[test]
fn missing_availability_counts_as_zero() {
    let engine = engine();
    let filter = FilterSpec {
        min_availability: Some(50),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&profile("half", &[]), &filter, now()).qualifies);
    assert_eq!(
        engine.qualify(&with_availability(profile("unknown", &[]), None), &filter, now()),
        Err(Disqualification::AvailabilityBelowMinimum {
            required: 50,
            actual: 0
        })
    );

    let zero = FilterSpec {
        min_availability: Some(0),
        ..FilterSpec::default()
    };
    assert!(
        engine
            .evaluate(&with_availability(profile("unknown", &[]), None), &zero, now())
            .qualifies
    );
}

#[test]
fn earliest_start_must_exist_and_fall_on_or_before_the_bound() {
    let engine = engine();
    let bound = now().date_naive();
    let filter = FilterSpec {
        earliest_start_by: Some(bound),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&profile("today", &[]), &filter, now()).qualifies);

    let mut later = profile("later", &[]);
    later.earliest_start = Some(bound + Duration::days(1));
    assert!(matches!(
        engine.qualify(&later, &filter, now()),
        Err(Disqualification::StartsTooLate { .. })
    ));

    let mut unknown = profile("unknown", &[]);
    unknown.earliest_start = None;
    assert_eq!(
        engine.qualify(&unknown, &filter, now()),
        Err(Disqualification::NoEarliestStart)
    );
}

#[test]
fn recency_window_is_inclusive_and_requires_a_timestamp() {
    let engine = engine();
    let filter = FilterSpec {
        updated_within_days: Some(30),
        ..FilterSpec::default()
    };

    let edge = with_last_updated(profile("edge", &[]), Some(days_ago(30)));
    assert!(engine.evaluate(&edge, &filter, now()).qualifies);

    let stale = with_last_updated(
        profile("stale", &[]),
        Some(days_ago(30) - Duration::seconds(1)),
    );
    assert_eq!(
        engine.qualify(&stale, &filter, now()),
        Err(Disqualification::UpdatedTooLongAgo {
            within_days: 30,
            days_since: 30
        })
    );

    let never = with_last_updated(profile("never", &[]), None);
    assert_eq!(
        engine.qualify(&never, &filter, now()),
        Err(Disqualification::NoLastUpdated)
    );
}

#[test]
fn zero_day_window_places_no_recency_constraint() {
    let engine = engine();
    let filter = FilterSpec::try_from(FilterRequest {
        updated_within_days: Some(0),
        ..FilterRequest::default()
    })
    .expect("valid");
    assert_eq!(filter.updated_within_days, None);

    let pool = vec![
        with_last_updated(profile("yesterday", &[]), Some(days_ago(1))),
        with_last_updated(profile("two-months", &[]), Some(days_ago(60))),
        with_last_updated(profile("never", &[]), None),
    ];
    assert_eq!(engine.rank_at(&pool, &filter, now()).len(), 3);

    let literal = FilterSpec {
        updated_within_days: Some(0),
        ..FilterSpec::default()
    };
    assert!(engine.evaluate(&pool[1], &literal, now()).qualifies);
}

#[test]
fn unset_mission_flag_reads_as_false() {
    let engine = engine();
    let mut undecided = profile("undecided", &[]);
    undecided.open_to_mission = None;

    let wants_false = FilterSpec {
        open_to_mission: Some(false),
        ..FilterSpec::default()
    };
    let wants_true = FilterSpec {
        open_to_mission: Some(true),
        ..FilterSpec::default()
    };

    assert!(engine.evaluate(&undecided, &wants_false, now()).qualifies);
    assert_eq!(
        engine.qualify(&undecided, &wants_true, now()),
        Err(Disqualification::MissionPreferenceMismatch { required: true })
    );
}

#[test]
fn reports_the_first_failed_constraint_in_order() {
    let engine = engine();
    let filter = FilterSpec {
        location: Some("paris".to_string()),
        min_availability: Some(90),
        open_to_mission: Some(false),
        ..FilterSpec::default()
    };

    let verdict = engine
        .qualify(&profile("berlin", &[]), &filter, now())
        .expect_err("fails several constraints");
    assert_eq!(verdict.constraint(), Constraint::Location);
    assert!(verdict.summary().contains("paris"));
}

fn qualified_ids(filter: &FilterSpec) -> Vec<String> {
    engine()
        .rank_at(&sample_profiles(now()), filter, now())
        .into_iter()
        .map(|ranked| ranked.profile.id.to_string())
        .collect()
}

fn assert_narrows(base: &FilterSpec, tightened: &FilterSpec) {
    let base_ids = qualified_ids(base);
    let tightened_ids = qualified_ids(tightened);

    assert!(!tightened_ids.is_empty());
    assert!(tightened_ids.len() < base_ids.len());
    assert!(
        tightened_ids.iter().all(|id| base_ids.contains(id)),
        "{tightened_ids:?} is not a subset of {base_ids:?}"
    );
}

#[test]
fn adding_a_constraint_never_admits_new_profiles() {
    let base = FilterSpec {
        category: Some(SkillCategory::Web),
        ..FilterSpec::default()
    };
    let narrowed = FilterSpec {
        min_availability: Some(50),
        open_to_mission: Some(true),
        ..base.clone()
    };

    assert_narrows(&base, &narrowed);
}

#[test]
fn raising_min_availability_only_removes_profiles() {
    let base = FilterSpec {
        min_availability: Some(40),
        ..FilterSpec::default()
    };
    let raised = FilterSpec {
        min_availability: Some(70),
        ..FilterSpec::default()
    };

    assert_narrows(&base, &raised);
}

#[test]
fn requiring_another_skill_only_removes_profiles() {
    let base = skills_filter(&[("react", 1)], false);
    let mut stricter = base.clone();
    stricter.skills.push(RequestedSkill::new("graphql", 1));

    assert_narrows(&base, &stricter);
}

#[test]
fn shrinking_the_recency_window_only_removes_profiles() {
    let base = FilterSpec {
        updated_within_days: Some(90),
        ..FilterSpec::default()
    };
    let shrunk = FilterSpec {
        updated_within_days: Some(14),
        ..FilterSpec::default()
    };

    assert_narrows(&base, &shrunk);
}

#[test]
fn repeated_skill_entries_resolve_to_the_first_level() {
    let engine = engine();
    let listed_twice = profile("listed-twice", &[("python", 2), ("python", 5)]);
    assert_eq!(listed_twice.level_of(&SkillId::new("python")), 2);

    let filter = skills_filter(&[("python", 3)], false);
    assert_eq!(
        engine.qualify(&listed_twice, &filter, now()),
        Err(Disqualification::MissingRequiredSkills {
            missing: vec![SkillId::new("python")]
        })
    );
}
