//! Error types for the tagstore core library
//!
//! Errors are grouped by the collaborator that raised them so callers can
//! tell a bad name apart from a digest failure or a storage failure.

use thiserror::Error;

pub mod batch;
pub mod hashing;
pub mod persistence;
pub mod validation;

pub use self::batch::BatchError;
pub use self::hashing::HashingError;
pub use self::persistence::PersistenceError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tagstore core library
///
/// - Validation errors: bad names, parameters and configuration
/// - Hashing errors: the digest collaborator failed or misbehaved
/// - Persistence errors: the repository collaborator failed
/// - Batch errors: a fail-fast batch was aborted
#[derive(Error, Debug)]
pub enum Error {
    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Digest related errors
    #[error(transparent)]
    Hashing(#[from] HashingError),

    /// Repository related errors
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Batch creation errors
    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl Error {
    /// Whether the error was raised before any repository call was attempted
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Conversions from external error types

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(PersistenceError::storage(format!(
            "Attribute encoding error: {err}"
        )))
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(PersistenceError::storage(format!("Database error: {err}")))
    }
}
