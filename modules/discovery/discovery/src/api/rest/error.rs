//! REST error mapping for discovery.

use tw_errors::{Problem, catalog};

use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let (def, detail) = match &e {
            DomainError::TherapistNotFound { id } => {
                (catalog::NOT_FOUND, format!("Therapist with id {id} was not found"))
            }
            DomainError::TherapistNotLive { id } => {
                (catalog::NOT_FOUND, format!("Therapist {id} is not live"))
            }
            DomainError::SessionNotFound { id } => {
                (catalog::NOT_FOUND, format!("Discovery session {id} was not found"))
            }
            DomainError::AuthRequired => (
                catalog::UNAUTHENTICATED,
                "Sign in to manage favorites".to_owned(),
            ),
            DomainError::SessionForbidden => (
                catalog::FORBIDDEN,
                "This discovery session belongs to another user".to_owned(),
            ),
            DomainError::InvalidCursor => (
                catalog::INVALID_CURSOR,
                "The continuation cursor is malformed or expired".to_owned(),
            ),
            DomainError::Validation { field, message } => {
                (catalog::VALIDATION, format!("{field}: {message}"))
            }
            DomainError::Store { .. } => {
                tracing::error!(error = %e, "therapist store failure");
                (
                    catalog::STORE_UNAVAILABLE,
                    "Error loading therapists".to_owned(),
                )
            }
        };

        let problem = def.problem(detail);
        if let DomainError::Validation { field, message } = e {
            problem.with_violation(field, message)
        } else {
            problem
        }
    }
}
