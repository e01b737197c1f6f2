//! Static error catalog.

use crate::problem::Problem;
use http::StatusCode;

/// Static error definition.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    /// Problem for this entry, tagged with the current span.
    pub fn problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail)
            .with_code(self.code)
            .with_type(format!("https://errors.theraway.app/{}", self.code))
            .in_current_span()
    }
}

pub const UNAUTHENTICATED: ErrDef = ErrDef {
    status: 401,
    title: "Authentication required",
    code: "auth.unauthenticated",
};

pub const FORBIDDEN: ErrDef = ErrDef {
    status: 403,
    title: "Forbidden",
    code: "auth.forbidden",
};

pub const NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "resource.not_found",
};

pub const VALIDATION: ErrDef = ErrDef {
    status: 422,
    title: "Validation Failed",
    code: "request.validation",
};

pub const INVALID_TRANSITION: ErrDef = ErrDef {
    status: 422,
    title: "Invalid status transition",
    code: "lifecycle.invalid_transition",
};

pub const INVALID_CURSOR: ErrDef = ErrDef {
    status: 422,
    title: "Invalid cursor",
    code: "discovery.invalid_cursor",
};

pub const STORE_UNAVAILABLE: ErrDef = ErrDef {
    status: 502,
    title: "Error loading data",
    code: "store.unavailable",
};

pub const FILE_REJECTED: ErrDef = ErrDef {
    status: 422,
    title: "File rejected",
    code: "upload.rejected",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "internal",
};
