use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::catalog::{CatalogError, SkillCatalog};
use super::domain::{Profile, Skill};
use super::export::{to_csv_string, ExportError};
use super::filter::{FilterError, FilterRequest, FilterSpec, SortKey};
use super::matching::{Disqualification, MatchResult, MatchingEngine, ScoreBreakdown};
use super::source::{ProfileSource, SourceError};

/// A qualifying profile detached from the pool it was ranked in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub profile: Profile,
    #[serde(rename = "match")]
    pub result: MatchResult,
}

/// Ranked response for one search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub evaluated: usize,
    pub sort_by: SortKey,
    pub results: Vec<SearchHit>,
}

impl SearchOutcome {
    pub fn qualified(&self) -> usize {
        self.results.len()
    }
}

/// Per-profile verdict used to explain why a profile was or was not listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileVerdict {
    pub profile: Profile,
    pub outcome: Result<ScoreBreakdown, Disqualification>,
}

/// Service composing the catalog, the profile source and the matching engine.
pub struct DirectorySearchService<S> {
    source: Arc<S>,
    engine: MatchingEngine,
}

impl<S> DirectorySearchService<S>
where
    S: ProfileSource + 'static,
{
    pub fn new(catalog: Arc<SkillCatalog>, source: Arc<S>) -> Self {
        Self {
            source,
            engine: MatchingEngine::new(catalog),
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        self.engine.catalog()
    }

    /// Skills a search form may offer, grouped by category.
    pub fn active_skills(&self) -> Vec<Skill> {
        self.catalog().active().into_iter().cloned().collect()
    }

    /// Validate a raw request and check it only names selectable skills.
    pub fn prepare(&self, request: FilterRequest) -> Result<FilterSpec, SearchServiceError> {
        let filter = FilterSpec::try_from(request)?;
        self.catalog().ensure_selectable(&filter)?;
        Ok(filter)
    }

    pub fn search(&self, request: FilterRequest) -> Result<SearchOutcome, SearchServiceError> {
        self.search_at(request, Utc::now())
    }

    /// Run a search with every recency check judged against `now`.
    pub fn search_at(
        &self,
        request: FilterRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchOutcome, SearchServiceError> {
        let filter = self.prepare(request)?;
        let profiles = self.source.load()?;

        let results: Vec<SearchHit> = self
            .engine
            .rank_at(&profiles, &filter, now)
            .into_iter()
            .map(|ranked| SearchHit {
                profile: ranked.profile.clone(),
                result: ranked.result,
            })
            .collect();

        info!(
            evaluated = profiles.len(),
            qualified = results.len(),
            requested_skills = filter.skills.len(),
            relaxed = filter.relaxed,
            sort_by = filter.sort_by.label(),
            "directory search completed"
        );

        Ok(SearchOutcome {
            evaluated: profiles.len(),
            sort_by: filter.sort_by,
            results,
        })
    }

    pub fn export_csv(&self, request: FilterRequest) -> Result<String, SearchServiceError> {
        self.export_csv_at(request, Utc::now())
    }

    /// CSV rendering of the same ranked list `search_at` returns.
    pub fn export_csv_at(
        &self,
        request: FilterRequest,
        now: DateTime<Utc>,
    ) -> Result<String, SearchServiceError> {
        let outcome = self.search_at(request, now)?;
        let csv = to_csv_string(
            outcome
                .results
                .iter()
                .map(|hit| (&hit.profile, hit.result)),
        )?;
        info!(rows = outcome.qualified(), "exported search results");
        Ok(csv)
    }

    /// Evaluate the whole pool in pool order, keeping disqualified profiles.
    pub fn explain_at(
        &self,
        request: FilterRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProfileVerdict>, SearchServiceError> {
        let filter = self.prepare(request)?;
        let profiles = self.source.load()?;

        Ok(self
            .engine
            .assess_at(&profiles, &filter, now)
            .into_iter()
            .map(|assessment| ProfileVerdict {
                profile: assessment.profile.clone(),
                outcome: assessment.outcome,
            })
            .collect())
    }
}

/// Error raised by the directory search service.
#[derive(Debug, thiserror::Error)]
pub enum SearchServiceError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
