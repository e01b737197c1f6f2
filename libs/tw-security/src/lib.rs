//! Caller identity for TheraWay requests.
//!
//! The authentication provider is external: its session handle and custom
//! role claims arrive here as a [`SecurityContext`]. Role-to-dashboard routing
//! is resolved once through [`DashboardRole`].

pub mod context;
pub mod extract;
pub mod guard;
pub mod profile;
pub mod role;

pub use context::{SecurityContext, SecurityContextBuilder};
pub use guard::{AccessError, authorize_section, require_authenticated, require_role};
pub use profile::UserProfile;
pub use role::{DashboardRole, DashboardSection, Role};
