//! Route guards for role-gated areas.

use thiserror::Error;

use crate::context::SecurityContext;
use crate::role::{DashboardSection, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("role '{required}' required")]
    Forbidden { required: Role },
}

/// Subject id of an authenticated caller.
pub fn require_authenticated(ctx: &SecurityContext) -> Result<&str, AccessError> {
    ctx.subject_id().ok_or(AccessError::Unauthenticated)
}

pub fn require_role(ctx: &SecurityContext, role: Role) -> Result<&str, AccessError> {
    let subject = require_authenticated(ctx)?;
    if ctx.has_role(role) {
        Ok(subject)
    } else {
        tracing::debug!(subject, required = %role, "role check failed");
        Err(AccessError::Forbidden { required: role })
    }
}

/// Guard for `/dashboard/{section}/...`. Admin may enter every section.
pub fn authorize_section(
    ctx: &SecurityContext,
    section: DashboardSection,
) -> Result<&str, AccessError> {
    require_role(ctx, section.required_role())
}
