//! Build a [`SecurityContext`] from request headers.
//!
//! The gateway in front of the server validates the provider token and
//! forwards its claims as `x-user-id`, `x-user-email` and `x-user-roles`
//! (comma separated). Missing or empty `x-user-id` yields an anonymous context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::context::SecurityContext;
use crate::role::Role;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[must_use]
pub fn context_from_headers(headers: &HeaderMap) -> SecurityContext {
    let Some(subject) = header_str(headers, USER_ID_HEADER) else {
        return SecurityContext::anonymous();
    };

    let mut builder = SecurityContext::builder().subject_id(subject);
    if let Some(email) = header_str(headers, USER_EMAIL_HEADER) {
        builder = builder.email(email);
    }
    for raw in header_str(headers, USER_ROLES_HEADER)
        .unwrap_or_default()
        .split(',')
        .filter(|r| !r.trim().is_empty())
    {
        match raw.parse::<Role>() {
            Ok(role) => builder = builder.role(role),
            Err(e) => tracing::warn!(error = %e, "ignoring role claim"),
        }
    }
    builder.build()
}

impl<S> FromRequestParts<S> for SecurityContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(context_from_headers(&parts.headers))
    }
}
