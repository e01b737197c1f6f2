//! Marketplace SDK
//!
//! Public API of the marketplace module:
//! - `MarketplaceClientV1` trait
//! - Clinic, space listing, inquiry and activity models
//! - Upload kinds and file descriptors
//! - Error type (`MarketplaceError`)

#![forbid(unsafe_code)]

pub mod client;
pub mod errors;
pub mod models;
pub mod upload;

pub use client::MarketplaceClientV1;
pub use discovery_sdk::{Certification, LifecycleStatus, Therapist};
pub use errors::MarketplaceError;
pub use models::{
    ActivityLog, Clinic, ClinicPatch, ClinicSpaceListing, InquiryStatus, ModerationDecision,
    NewCertification, NewInquiry, NewSpaceListing, TherapistPatch, UserInquiry,
};
pub use upload::{FileCandidate, FileCategory, StoredFile, UploadKind};
