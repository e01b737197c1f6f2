//! Therapist discovery module.
//!
//! Turns a filter set into store queries, refines fetched pages, accumulates
//! them under cursor pagination and keeps per-visitor view state (spotlight,
//! grid, map) plus optimistic favorites.
//!
//! The public API is defined in `discovery-sdk` and re-exported here.

pub use discovery_sdk::{
    Cursor, DiscoveryClientV1, DiscoveryError, Filters, LifecycleStatus, Page, Therapist,
    ViewMode,
};

pub mod module;
pub use module::DiscoveryModule;

pub mod local_client;

#[doc(hidden)]
pub mod api;
pub mod config;
#[doc(hidden)]
pub mod domain;
pub mod infra;
