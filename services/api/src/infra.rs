use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use skills_directory::config::DirectoryConfig;
use skills_directory::directory::{
    sample_profiles, DirectoryImporter, Profile, ProfileSource, SkillCatalog, SourceError,
};
use skills_directory::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Profile pool loaded once at startup and shared across requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileSource {
    profiles: Arc<Vec<Profile>>,
}

impl InMemoryProfileSource {
    pub(crate) fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(profiles),
        }
    }
}

impl ProfileSource for InMemoryProfileSource {
    fn load(&self) -> Result<Vec<Profile>, SourceError> {
        Ok(self.profiles.as_ref().clone())
    }
}

/// Catalog and profile pool from the configured JSON files, falling back to
/// the built-in sample directory anchored on `now`.
pub(crate) fn load_directory(
    config: &DirectoryConfig,
    now: DateTime<Utc>,
) -> Result<(SkillCatalog, Vec<Profile>), AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => DirectoryImporter::catalog_from_path(path)?,
        None => SkillCatalog::standard(),
    };

    let profiles = match &config.profiles_path {
        Some(path) => DirectoryImporter::profiles_from_path(path)?,
        None => sample_profiles(now),
    };

    info!(
        catalog_source = source_label(config.catalog_path.is_some()),
        profile_source = source_label(config.profiles_path.is_some()),
        skills = catalog.len(),
        profiles = profiles.len(),
        "directory loaded"
    );

    Ok((catalog, profiles))
}

fn source_label(from_file: bool) -> &'static str {
    if from_file {
        "file"
    } else {
        "sample"
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Midnight UTC on `date`, used when a CLI run pins the evaluation instant.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
