use super::domain::Profile;

/// Read access to the profile pool so the search service can be exercised in isolation.
pub trait ProfileSource: Send + Sync {
    fn load(&self) -> Result<Vec<Profile>, SourceError>;
}

/// Error enumeration for profile source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("profile source unavailable: {0}")]
    Unavailable(String),
}
