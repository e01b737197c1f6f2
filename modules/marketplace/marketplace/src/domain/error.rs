use discovery_sdk::DiscoveryError;
use marketplace_sdk::MarketplaceError;
use thiserror::Error;
use tw_security::{AccessError, Role};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Cannot {action} from status '{from}'")]
    InvalidTransition { from: String, action: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Role '{required}' required")]
    Forbidden { required: Role },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("File rejected: {reason}")]
    FileRejected { reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_transition(from: impl std::fmt::Display, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_rejected(reason: impl Into<String>) -> Self {
        Self::FileRejected {
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(format!("{e:#}"))
    }
}

impl From<AccessError> for DomainError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => Self::AuthRequired,
            AccessError::Forbidden { required } => Self::Forbidden { required },
        }
    }
}

impl From<DiscoveryError> for DomainError {
    fn from(e: DiscoveryError) -> Self {
        match e {
            DiscoveryError::AuthRequired => Self::AuthRequired,
            DiscoveryError::NotFound { id } | DiscoveryError::NotLive { id } => {
                Self::not_found("Therapist", id)
            }
            DiscoveryError::Store { message } => Self::Storage(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for MarketplaceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity, id } => MarketplaceError::not_found(entity, id),
            DomainError::InvalidTransition { from, action } => {
                MarketplaceError::InvalidTransition { from, action }
            }
            DomainError::AuthRequired => MarketplaceError::AuthRequired,
            DomainError::Forbidden { required } => MarketplaceError::Forbidden {
                message: format!("role '{required}' required"),
            },
            DomainError::Validation { field, message } => {
                MarketplaceError::validation(format!("{field}: {message}"))
            }
            DomainError::FileRejected { reason } => MarketplaceError::FileRejected { reason },
            DomainError::Storage(_) => MarketplaceError::Storage,
            DomainError::Internal(_) => MarketplaceError::Internal,
        }
    }
}
