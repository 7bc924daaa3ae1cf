use super::domain::{ClaimId, ClaimRecord, ClaimStatus};

/// Storage abstraction so the review service can be exercised in isolation.
pub trait ClaimRepository: Send + Sync {
    fn insert(&self, record: ClaimRecord) -> Result<ClaimRecord, RepositoryError>;
    /// Replace the stored record only if its status still equals `expected`.
    ///
    /// The check and the write must be atomic; a mismatch is `Conflict`.
    fn transition(
        &self,
        expected: ClaimStatus,
        record: ClaimRecord,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ClaimId) -> Result<Option<ClaimRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ClaimRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
