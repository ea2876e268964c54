//! Domain errors

use thiserror::Error;

/// Failures the directory surfaces to its callers. Lookups that find nothing
/// are not errors; they come back as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
