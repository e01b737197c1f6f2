//! Error types shared by TheraWay modules.
//!
//! - RFC 9457 problem documents (`Problem`) with an axum `IntoResponse` impl
//! - A static catalog of error definitions (`ErrDef`, [`catalog`])

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};
