use discovery_sdk::DiscoveryError;
use thiserror::Error;

use crate::domain::ports::StoreError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Therapist not found: {id}")]
    TherapistNotFound { id: String },

    #[error("Therapist {id} is not live")]
    TherapistNotLive { id: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Session belongs to another user")]
    SessionForbidden,

    #[error("Invalid cursor")]
    InvalidCursor,

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn therapist_not_found(id: impl Into<String>) -> Self {
        Self::TherapistNotFound { id: id.into() }
    }

    pub fn therapist_not_live(id: impl Into<String>) -> Self {
        Self::TherapistNotLive { id: id.into() }
    }

    pub fn session_not_found(id: impl Into<String>) -> Self {
        Self::SessionNotFound { id: id.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidCursor => DomainError::InvalidCursor,
            StoreError::Unavailable(message) => DomainError::Store { message },
        }
    }
}

impl From<DomainError> for DiscoveryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::TherapistNotFound { id } => DiscoveryError::not_found(id),
            DomainError::TherapistNotLive { id } => DiscoveryError::not_live(id),
            DomainError::AuthRequired => DiscoveryError::AuthRequired,
            DomainError::InvalidCursor => DiscoveryError::InvalidCursor,
            DomainError::Store { message } => DiscoveryError::store(message),
            DomainError::Validation { field, message } => {
                DiscoveryError::validation(format!("{field}: {message}"))
            }
            DomainError::SessionNotFound { .. } | DomainError::SessionForbidden => {
                DiscoveryError::Internal
            }
        }
    }
}
