//! Evidence-specific error types with reason codes.

use thiserror::Error;

/// Reason codes for evidence errors, providing machine-readable context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// Bundle failed structural validation.
    BundleStructure = 100,
    /// Serialization or deserialization failed.
    SerializationFailed = 200,
    /// Writing a document to durable storage failed.
    PersistenceFailed = 300,
    /// Creating the evidence archive failed.
    PackagingFailed = 400,
}

/// Errors that can occur during evidence operations.
///
/// Provider unavailability is deliberately absent: a failed category fetch is
/// an in-band `ProviderResponse::Unavailable` value, never an error.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// The evidence bundle is structurally invalid.
    #[error("Invalid bundle (reason {reason}): {message}")]
    InvalidBundle { reason: u32, message: String },

    /// Serialization or deserialization failed.
    #[error("Serialization error (reason {reason}): {message}")]
    SerializationError { reason: u32, message: String },

    /// Writing the bundle or summary to durable storage failed. Fatal to the
    /// run; carries the target path so the invoker can retry.
    #[error("Persistence error (reason {reason}) writing '{path}': {message}")]
    PersistenceError {
        reason: u32,
        path: String,
        message: String,
    },

    /// Creating or writing the evidence archive failed.
    #[error("Packaging error (reason {reason}) for '{path}': {message}")]
    PackagingError {
        reason: u32,
        path: String,
        message: String,
    },
}

impl EvidenceError {
    pub fn invalid_bundle(message: impl Into<String>) -> Self {
        Self::InvalidBundle {
            reason: ReasonCode::BundleStructure as u32,
            message: message.into(),
        }
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            reason: ReasonCode::SerializationFailed as u32,
            message: message.into(),
        }
    }

    pub fn persistence_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PersistenceError {
            reason: ReasonCode::PersistenceFailed as u32,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn packaging_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PackagingError {
            reason: ReasonCode::PackagingFailed as u32,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for EvidenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_error(err.to_string())
    }
}

/// Result type for evidence operations.
pub type EvidenceResult<T> = std::result::Result<T, EvidenceError>;
