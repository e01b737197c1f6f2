//! Public error types for the discovery module.

use thiserror::Error;

/// Errors returned by `DiscoveryClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// No therapist with this id exists.
    #[error("Therapist not found: {id}")]
    NotFound { id: String },

    /// The therapist exists but is not visible to the public.
    #[error("Therapist {id} is not live")]
    NotLive { id: String },

    /// The caller must sign in first.
    #[error("Authentication required")]
    AuthRequired,

    /// The continuation token could not be interpreted.
    #[error("Invalid cursor")]
    InvalidCursor,

    /// The document store failed; shown as an "error loading" state.
    #[error("Error loading therapists: {message}")]
    Store { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl DiscoveryError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn not_live(id: impl Into<String>) -> Self {
        Self::NotLive { id: id.into() }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
