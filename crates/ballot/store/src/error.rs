use ballot_types::BallotError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for editing session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Why an edit did not go through.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The engine refused the edit; nothing changed anywhere.
    #[error("edit rejected: {0}")]
    Rejected(#[from] BallotError),

    /// The engine accepted the edit but the store did not; in-memory state
    /// was rolled back to the last confirmed snapshot.
    #[error("edit not persisted: {0}")]
    Persistence(#[from] StoreError),
}

impl SessionError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The engine error behind a rejection, if any.
    pub fn ballot_error(&self) -> Option<&BallotError> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Persistence(_) => None,
        }
    }
}
