//! `MarketplaceClientV1` trait definition.

use async_trait::async_trait;
use discovery_sdk::{Certification, Therapist};
use tw_security::SecurityContext;

use crate::errors::MarketplaceError;
use crate::models::{
    Clinic, ClinicPatch, ClinicSpaceListing, InquiryStatus, ModerationDecision, NewCertification,
    NewInquiry, NewSpaceListing, TherapistPatch, UserInquiry,
};
use crate::upload::{FileCandidate, StoredFile, UploadKind};

/// Public API of the marketplace module.
///
/// Owner operations act on the caller's own listing; admin operations require the admin role.
#[async_trait]
pub trait MarketplaceClientV1: Send + Sync {
    /// Caller's therapist profile, created as a draft on first access.
    async fn ensure_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, MarketplaceError>;

    async fn update_therapist_profile(
        &self,
        ctx: &SecurityContext,
        patch: TherapistPatch,
    ) -> Result<Therapist, MarketplaceError>;

    /// Send the caller's profile for review (`pending_approval`).
    async fn submit_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, MarketplaceError>;

    async fn add_certification(
        &self,
        ctx: &SecurityContext,
        certification: NewCertification,
    ) -> Result<Certification, MarketplaceError>;

    /// Remove a certification together with its stored file.
    async fn remove_certification(
        &self,
        ctx: &SecurityContext,
        certification_id: &str,
    ) -> Result<(), MarketplaceError>;

    async fn moderate_therapist(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Therapist, MarketplaceError>;

    /// Caller's clinic, created as a draft on first access.
    async fn ensure_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, MarketplaceError>;

    async fn update_clinic(
        &self,
        ctx: &SecurityContext,
        patch: ClinicPatch,
    ) -> Result<Clinic, MarketplaceError>;

    async fn submit_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, MarketplaceError>;

    async fn moderate_clinic(
        &self,
        ctx: &SecurityContext,
        clinic_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Clinic, MarketplaceError>;

    async fn add_space_listing(
        &self,
        ctx: &SecurityContext,
        listing: NewSpaceListing,
    ) -> Result<ClinicSpaceListing, MarketplaceError>;

    /// Remove a listing together with its stored photos.
    async fn remove_space_listing(
        &self,
        ctx: &SecurityContext,
        listing_id: &str,
    ) -> Result<(), MarketplaceError>;

    /// Validate and store a file for the caller.
    async fn upload_file(
        &self,
        ctx: &SecurityContext,
        kind: UploadKind,
        candidate: FileCandidate,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, MarketplaceError>;

    async fn create_inquiry(
        &self,
        ctx: &SecurityContext,
        inquiry: NewInquiry,
    ) -> Result<UserInquiry, MarketplaceError>;

    async fn update_inquiry_status(
        &self,
        ctx: &SecurityContext,
        inquiry_id: &str,
        status: InquiryStatus,
        reply: Option<String>,
    ) -> Result<UserInquiry, MarketplaceError>;
}
