//! Role guard for `/dashboard/{section}/...` and `/admin/...`.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tw_errors::Problem;
use tw_security::{DashboardSection, SecurityContext, authorize_section};

use crate::domain::error::DomainError;

/// Section a request path belongs to, if it is role-gated.
#[must_use]
pub fn section_for_path(path: &str) -> Option<DashboardSection> {
    let mut segments = path.trim_start_matches('/').split('/');
    match segments.next()? {
        "dashboard" => DashboardSection::from_segment(segments.next()?),
        "admin" => Some(DashboardSection::Admin),
        _ => None,
    }
}

/// Rejects callers without the section's role before the handler runs.
pub async fn require_section(ctx: SecurityContext, req: Request, next: Next) -> Response {
    if let Some(section) = section_for_path(req.uri().path())
        && let Err(e) = authorize_section(&ctx, section)
    {
        tracing::debug!(path = req.uri().path(), error = %e, "dashboard access denied");
        return Problem::from(DomainError::from(e)).into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_from_paths() {
        assert_eq!(
            section_for_path("/dashboard/therapist/profile"),
            Some(DashboardSection::Therapist)
        );
        assert_eq!(
            section_for_path("/dashboard/clinic"),
            Some(DashboardSection::Clinic)
        );
        assert_eq!(
            section_for_path("/admin/inquiries/i1/status"),
            Some(DashboardSection::Admin)
        );
        assert_eq!(section_for_path("/dashboard"), None);
        assert_eq!(section_for_path("/inquiries"), None);
        assert_eq!(section_for_path("/locales/en"), None);
    }
}
