//! Error types for role synthesis.

use thiserror::Error;

/// Errors raised by the plugin.
///
/// Malformed stream declarations are not errors; they are skipped with a
/// diagnostic so a single bad event can never fail a packaging pass.
#[derive(Debug, Error)]
pub enum CustomRolesError {
    /// The host framework predates per-function role support.
    #[error("lambda-custom-roles requires framework version 1.12 or higher (found '{0}')")]
    UnsupportedFrameworkVersion(String),

    /// An assembled role resource could not be converted to template JSON.
    #[error("failed to serialize role resource: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CustomRolesResult<T> = Result<T, CustomRolesError>;
