//! Public error types for the marketplace module.

use discovery_sdk::LifecycleStatus;
use thiserror::Error;

/// Errors returned by `MarketplaceClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The requested lifecycle or inquiry move is not allowed from the current state.
    #[error("Cannot {action} from status '{from}'")]
    InvalidTransition { from: String, action: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Rejected before any storage call.
    #[error("File rejected: {reason}")]
    FileRejected { reason: String },

    #[error("Storage error")]
    Storage,

    #[error("Internal error")]
    Internal,
}

impl MarketplaceError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_transition(from: LifecycleStatus, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
