//! Discovery SDK
//!
//! Public API of the therapist discovery module:
//! - `DiscoveryClientV1` trait
//! - Therapist models and lifecycle status
//! - `Filters`, `ViewMode` and the opaque page `Cursor`
//! - Error type (`DiscoveryError`)
//!
//! ```ignore
//! use discovery_sdk::{DiscoveryClientV1, Filters, ViewMode};
//!
//! let page = client.search(&ctx, &Filters::default(), ViewMode::Grid, None).await?;
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod errors;
pub mod filters;
pub mod models;
pub mod page;

pub use client::DiscoveryClientV1;
pub use errors::DiscoveryError;
pub use filters::{Filters, ViewMode};
pub use models::{
    Certification, GeoPoint, LifecycleStatus, MembershipApplication, PracticeLocation, Therapist,
};
pub use page::{Cursor, Page};
