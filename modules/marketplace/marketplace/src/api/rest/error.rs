//! REST error mapping for the marketplace.

use tw_errors::{Problem, catalog};

use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let (def, detail) = match &e {
            DomainError::NotFound { entity, id } => {
                (catalog::NOT_FOUND, format!("{entity} with id {id} was not found"))
            }
            DomainError::InvalidTransition { from, action } => (
                catalog::INVALID_TRANSITION,
                format!("Cannot {action} from status '{from}'"),
            ),
            DomainError::AuthRequired => {
                (catalog::UNAUTHENTICATED, "Sign in to continue".to_owned())
            }
            DomainError::Forbidden { required } => (
                catalog::FORBIDDEN,
                format!("This area requires the '{required}' role"),
            ),
            DomainError::Validation { field, message } => {
                (catalog::VALIDATION, format!("{field}: {message}"))
            }
            DomainError::FileRejected { reason } => (catalog::FILE_REJECTED, reason.clone()),
            DomainError::Storage(_) => {
                tracing::error!(error = %e, "marketplace storage failure");
                (
                    catalog::STORE_UNAVAILABLE,
                    "The request could not be completed, please retry".to_owned(),
                )
            }
            DomainError::Internal(_) => {
                tracing::error!(error = %e, "marketplace internal error");
                (
                    catalog::INTERNAL,
                    "An internal error occurred".to_owned(),
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
