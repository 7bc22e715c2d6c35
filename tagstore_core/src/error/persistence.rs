//! Repository error types

use thiserror::Error;

/// Errors surfaced by the tag repository
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Saving a record failed
    #[error("Failed to save tag '{id}': {message}")]
    SaveFailed { id: String, message: String },

    /// Removing a record failed
    #[error("Failed to remove tag '{id}': {message}")]
    RemoveFailed { id: String, message: String },

    /// A record reached the repository without an identifier
    #[error("Tag record has no id")]
    MissingId,

    /// Underlying storage engine error
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl PersistenceError {
    /// Create a save failure error
    pub fn save_failed(id: &str, message: &str) -> Self {
        Self::SaveFailed {
            id: id.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a remove failure error
    pub fn remove_failed(id: &str, message: &str) -> Self {
        Self::RemoveFailed {
            id: id.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a storage engine error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_error() {
        let error = PersistenceError::save_failed("abc123", "disk full");
        assert!(error.to_string().contains("Failed to save tag"));
        assert!(error.to_string().contains("abc123"));
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn test_remove_failed_error() {
        let error = PersistenceError::remove_failed("abc123", "locked");
        assert!(error.to_string().contains("Failed to remove tag"));
        assert!(error.to_string().contains("locked"));
    }

    #[test]
    fn test_storage_error() {
        let error = PersistenceError::storage("database is locked");
        assert!(error.to_string().contains("Storage error"));
    }
}
