use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::directory::catalog::SkillCatalog;
use crate::directory::domain::{Profile, ProfileId, ProfileSkill};
use crate::directory::filter::{FilterSpec, RequestedSkill};
use crate::directory::matching::MatchingEngine;
use crate::directory::service::DirectorySearchService;
use crate::directory::source::{ProfileSource, SourceError};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// Profile holding `skills` with neutral defaults for every other field.
pub(super) fn profile(id: &str, skills: &[(&str, u8)]) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        full_name: id.to_string(),
        email: format!("{id}@example.com"),
        job_title: Some("Consultant".to_string()),
        business_unit: Some("Analytics".to_string()),
        location_city: Some("Berlin".to_string()),
        location_country: Some("DE".to_string()),
        languages: vec!["EN".to_string()],
        availability_percent: Some(50),
        earliest_start: Some(now().date_naive()),
        availability_notes: None,
        open_to_mission: Some(true),
        last_updated: Some(days_ago(10)),
        skills: skills
            .iter()
            .map(|(skill_id, level)| ProfileSkill::new(*skill_id, *level))
            .collect(),
    }
}

pub(super) fn with_availability(mut profile: Profile, percent: Option<u8>) -> Profile {
    profile.availability_percent = percent;
    profile
}

pub(super) fn with_last_updated(mut profile: Profile, updated: Option<DateTime<Utc>>) -> Profile {
    profile.last_updated = updated;
    profile
}

pub(super) fn skills_filter(skills: &[(&str, u8)], relaxed: bool) -> FilterSpec {
    FilterSpec {
        skills: skills
            .iter()
            .map(|(skill_id, level)| RequestedSkill::new(*skill_id, *level))
            .collect(),
        relaxed,
        ..FilterSpec::default()
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(Arc::new(SkillCatalog::standard()))
}

#[derive(Default, Clone)]
pub(super) struct MemorySource {
    profiles: Vec<Profile>,
}

impl MemorySource {
    pub(super) fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }
}

impl ProfileSource for MemorySource {
    fn load(&self) -> Result<Vec<Profile>, SourceError> {
        Ok(self.profiles.clone())
    }
}

pub(super) struct UnavailableSource;

impl ProfileSource for UnavailableSource {
    fn load(&self) -> Result<Vec<Profile>, SourceError> {
        Err(SourceError::Unavailable("directory export offline".to_string()))
    }
}

pub(super) fn build_service(profiles: Vec<Profile>) -> DirectorySearchService<MemorySource> {
    DirectorySearchService::new(
        Arc::new(SkillCatalog::standard()),
        Arc::new(MemorySource::new(profiles)),
    )
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
