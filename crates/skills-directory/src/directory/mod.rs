//! Skills directory search: catalog, filters, matching, ranking and export.
//!
//! The matching engine is pure and stateless; the service layer validates raw
//! requests against the catalog, loads the pool from a [`ProfileSource`] and
//! hands owned results to the HTTP and CLI adapters.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod filter;
pub mod import;
pub mod matching;
pub mod router;
pub mod sample;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use catalog::{skill_id_for, CatalogError, SkillCatalog};
pub use domain::{Profile, ProfileId, ProfileSkill, Skill, SkillCategory, SkillId};
pub use export::{to_csv_string, write_csv, ExportError};
pub use filter::{FilterError, FilterRequest, FilterSpec, RequestedSkill, SortKey};
pub use import::{DirectoryImportError, DirectoryImporter};
pub use matching::{
    Assessment, Constraint, Disqualification, MatchResult, MatchingEngine, RankedProfile,
    ScoreBreakdown,
};
pub use router::search_router;
pub use sample::sample_profiles;
pub use service::{
    DirectorySearchService, ProfileVerdict, SearchHit, SearchOutcome, SearchServiceError,
};
pub use source::{ProfileSource, SourceError};
