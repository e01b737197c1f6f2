//! Local client adapter implementing the SDK API trait.

use std::sync::Arc;

use async_trait::async_trait;
use discovery_sdk::{Certification, Therapist};
use marketplace_sdk::{
    Clinic, ClinicPatch, ClinicSpaceListing, FileCandidate, InquiryStatus, MarketplaceClientV1,
    MarketplaceError, ModerationDecision, NewCertification, NewInquiry, NewSpaceListing,
    StoredFile, TherapistPatch, UploadKind, UserInquiry,
};
use tw_security::SecurityContext;

use crate::domain::service::Service;

/// In-process `MarketplaceClientV1` backed by the domain service.
pub struct MarketplaceLocalClient {
    service: Arc<Service>,
}

impl MarketplaceLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MarketplaceClientV1 for MarketplaceLocalClient {
    async fn ensure_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, MarketplaceError> {
        self.service
            .ensure_therapist_profile(ctx)
            .await
            .map_err(Into::into)
    }

    async fn update_therapist_profile(
        &self,
        ctx: &SecurityContext,
        patch: TherapistPatch,
    ) -> Result<Therapist, MarketplaceError> {
        self.service
            .update_therapist_profile(ctx, patch)
            .await
            .map_err(Into::into)
    }

    async fn submit_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, MarketplaceError> {
        self.service
            .submit_therapist_profile(ctx)
            .await
            .map_err(Into::into)
    }

    async fn add_certification(
        &self,
        ctx: &SecurityContext,
        certification: NewCertification,
    ) -> Result<Certification, MarketplaceError> {
        self.service
            .add_certification(ctx, certification)
            .await
            .map_err(Into::into)
    }

    async fn remove_certification(
        &self,
        ctx: &SecurityContext,
        certification_id: &str,
    ) -> Result<(), MarketplaceError> {
        self.service
            .remove_certification(ctx, certification_id)
            .await
            .map_err(Into::into)
    }

    async fn moderate_therapist(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Therapist, MarketplaceError> {
        self.service
            .moderate_therapist(ctx, therapist_id, decision, note)
            .await
            .map_err(Into::into)
    }

    async fn ensure_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, MarketplaceError> {
        self.service.ensure_clinic(ctx).await.map_err(Into::into)
    }

    async fn update_clinic(
        &self,
        ctx: &SecurityContext,
        patch: ClinicPatch,
    ) -> Result<Clinic, MarketplaceError> {
        self.service
            .update_clinic(ctx, patch)
            .await
            .map_err(Into::into)
    }

    async fn submit_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, MarketplaceError> {
        self.service.submit_clinic(ctx).await.map_err(Into::into)
    }

    async fn moderate_clinic(
        &self,
        ctx: &SecurityContext,
        clinic_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Clinic, MarketplaceError> {
        self.service
            .moderate_clinic(ctx, clinic_id, decision, note)
            .await
            .map_err(Into::into)
    }

    async fn add_space_listing(
        &self,
        ctx: &SecurityContext,
        listing: NewSpaceListing,
    ) -> Result<ClinicSpaceListing, MarketplaceError> {
        self.service
            .add_space_listing(ctx, listing)
            .await
            .map_err(Into::into)
    }

    async fn remove_space_listing(
        &self,
        ctx: &SecurityContext,
        listing_id: &str,
    ) -> Result<(), MarketplaceError> {
        self.service
            .remove_space_listing(ctx, listing_id)
            .await
            .map_err(Into::into)
    }

    async fn upload_file(
        &self,
        ctx: &SecurityContext,
        kind: UploadKind,
        candidate: FileCandidate,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, MarketplaceError> {
        self.service
            .upload_file(ctx, kind, candidate, bytes)
            .await
            .map_err(Into::into)
    }

    async fn create_inquiry(
        &self,
        ctx: &SecurityContext,
        inquiry: NewInquiry,
    ) -> Result<UserInquiry, MarketplaceError> {
        self.service
            .create_inquiry(ctx, inquiry)
            .await
            .map_err(Into::into)
    }

    async fn update_inquiry_status(
        &self,
        ctx: &SecurityContext,
        inquiry_id: &str,
        status: InquiryStatus,
        reply: Option<String>,
    ) -> Result<UserInquiry, MarketplaceError> {
        self.service
            .update_inquiry_status(ctx, inquiry_id, status, reply)
            .await
            .map_err(Into::into)
    }
}
