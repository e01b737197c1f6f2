//! Marketplace module.
//!
//! Therapist and clinic listings move through a moderated lifecycle
//! (`draft -> pending_approval -> live | rejected`). Owners edit their listing
//! from role-gated dashboards, upload validated media, and admins moderate
//! listings and answer user inquiries. UI strings are served from a locale
//! catalog with an English fallback.
//!
//! The public API is defined in `marketplace-sdk` and re-exported here.

pub use marketplace_sdk::{
    Clinic, ClinicSpaceListing, InquiryStatus, MarketplaceClientV1, MarketplaceError,
    ModerationDecision, UploadKind, UserInquiry,
};

pub mod module;
pub use module::MarketplaceModule;

pub mod local_client;

#[doc(hidden)]
pub mod api;
pub mod config;
#[doc(hidden)]
pub mod domain;
pub mod infra;
