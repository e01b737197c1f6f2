//! Marketplace domain service.
//!
//! Owners (therapists, clinic owners) edit and submit their own listing,
//! admins moderate them and answer inquiries. Every state change is recorded
//! in the activity log; files replaced or orphaned by an edit are deleted
//! from object storage on a best-effort basis.

use std::sync::Arc;

use discovery_sdk::{
    Certification, DiscoveryClientV1, DiscoveryError, LifecycleStatus, MembershipApplication,
    Therapist,
};
use marketplace_sdk::{
    ActivityLog, Clinic, ClinicPatch, ClinicSpaceListing, FileCandidate, InquiryStatus,
    ModerationDecision, NewCertification, NewInquiry, NewSpaceListing, StoredFile,
    TherapistPatch, UploadKind, UserInquiry,
};
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use tw_security::{Role, SecurityContext, require_authenticated, require_role};
use uuid::Uuid;

use super::error::DomainError;
use super::lifecycle::{LifecycleAction, transition};
use super::ports::{ActivityLogStore, ClinicStore, InquiryStore, ObjectStorage, ProfileStore};
use super::uploads::{UploadPolicy, storage_path};
use crate::config::MarketplaceConfig;

const MAX_NAME_LEN: usize = 100;
const MAX_BIO_LEN: usize = 2000;
const MAX_SUBJECT_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 5000;
const RECENT_ACTIVITY: usize = 20;
const MEMBERSHIP_TERM: Duration = Duration::days(365);

/// Storage handles the service depends on.
pub struct Ports {
    pub profiles: Arc<dyn ProfileStore>,
    pub clinics: Arc<dyn ClinicStore>,
    pub inquiries: Arc<dyn InquiryStore>,
    pub activity: Arc<dyn ActivityLogStore>,
    pub storage: Arc<dyn ObjectStorage>,
}

/// Moderation queue and recent activity shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub pending_therapists: Vec<Therapist>,
    pub pending_clinics: Vec<Clinic>,
    pub open_inquiries: Vec<UserInquiry>,
    pub recent_activity: Vec<ActivityLog>,
}

pub struct Service {
    ports: Ports,
    discovery: Arc<dyn DiscoveryClientV1>,
    uploads: UploadPolicy,
}

impl Service {
    pub fn new(
        ports: Ports,
        discovery: Arc<dyn DiscoveryClientV1>,
        cfg: &MarketplaceConfig,
    ) -> Self {
        Self {
            ports,
            discovery,
            uploads: UploadPolicy::from(cfg),
        }
    }

    // === Therapist profile ===

    /// Caller's profile; a draft is created on first visit.
    pub async fn ensure_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, DomainError> {
        let uid = require_role(ctx, Role::Therapist)?;
        if let Some(existing) = self.ports.profiles.get(uid).await? {
            return Ok(existing);
        }
        let draft = Therapist::draft(uid, "");
        self.ports.profiles.put(draft.clone()).await?;
        info!(therapist_id = uid, "created draft therapist profile");
        Ok(draft)
    }

    pub async fn update_therapist_profile(
        &self,
        ctx: &SecurityContext,
        patch: TherapistPatch,
    ) -> Result<Therapist, DomainError> {
        validate_therapist_patch(&patch)?;
        let mut therapist = self.ensure_therapist_profile(ctx).await?;
        self.check_owned_files(
            &therapist.id,
            [
                ("profilePictureUrl", patch.profile_picture_url.as_deref()),
                ("introVideoUrl", patch.intro_video_url.as_deref()),
                ("paymentReceiptUrl", patch.payment_receipt_url.as_deref()),
            ],
        )?;
        let replaced = apply_therapist_patch(&mut therapist, patch);
        therapist.normalize_primary_location();

        self.ports.profiles.put(therapist.clone()).await?;
        debug!(therapist_id = %therapist.id, replaced = replaced.len(), "therapist profile updated");
        self.delete_files(&therapist.id, replaced).await;
        Ok(therapist)
    }

    pub async fn submit_therapist_profile(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Therapist, DomainError> {
        let mut therapist = self.ensure_therapist_profile(ctx).await?;
        if therapist.name.trim().is_empty() {
            return Err(DomainError::validation(
                "name",
                "required before submitting for review",
            ));
        }
        if therapist.specializations.is_empty()
            && therapist
                .other_specializations
                .as_deref()
                .is_none_or(|s| s.trim().is_empty())
        {
            return Err(DomainError::validation(
                "specializations",
                "at least one specialization is required",
            ));
        }

        let from = therapist.account_status;
        therapist.account_status = transition(from, LifecycleAction::Submit)?;
        therapist
            .membership
            .get_or_insert_with(MembershipApplication::default)
            .applied_at = Some(OffsetDateTime::now_utc());
        self.ports.profiles.put(therapist.clone()).await?;

        info!(therapist_id = %therapist.id, %from, "therapist profile submitted for review");
        self.record(&therapist.id, "therapist.submitted", &therapist.id, None)
            .await;
        Ok(therapist)
    }

    pub async fn add_certification(
        &self,
        ctx: &SecurityContext,
        new: NewCertification,
    ) -> Result<Certification, DomainError> {
        let name = required_text("name", &new.name, MAX_NAME_LEN)?;
        let mut therapist = self.ensure_therapist_profile(ctx).await?;
        self.check_owned_files(&therapist.id, [("fileUrl", new.file_url.as_deref())])?;
        let certification = Certification {
            id: Uuid::new_v4().to_string(),
            name,
            issuer: new.issuer.trim().to_owned(),
            file_url: new.file_url.filter(|u| !u.trim().is_empty()),
            verified: false,
        };
        therapist.certifications.push(certification.clone());
        self.ports.profiles.put(therapist).await?;
        Ok(certification)
    }

    pub async fn remove_certification(
        &self,
        ctx: &SecurityContext,
        certification_id: &str,
    ) -> Result<(), DomainError> {
        let mut therapist = self.ensure_therapist_profile(ctx).await?;
        let pos = therapist
            .certifications
            .iter()
            .position(|c| c.id == certification_id)
            .ok_or_else(|| DomainError::not_found("Certification", certification_id))?;
        let removed = therapist.certifications.remove(pos);
        let owner_id = therapist.id.clone();
        self.ports.profiles.put(therapist).await?;
        self.delete_files(&owner_id, removed.file_url).await;
        Ok(())
    }

    /// Admin: mark a certification as checked (shown publicly) or not.
    pub async fn verify_certification(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        certification_id: &str,
        verified: bool,
    ) -> Result<Certification, DomainError> {
        let admin = require_role(ctx, Role::Admin)?;
        let mut therapist = self.load_therapist(therapist_id).await?;
        let certification = therapist
            .certifications
            .iter_mut()
            .find(|c| c.id == certification_id)
            .ok_or_else(|| DomainError::not_found("Certification", certification_id))?;
        certification.verified = verified;
        let updated = certification.clone();
        self.ports.profiles.put(therapist).await?;

        let action = if verified {
            "certification.verified"
        } else {
            "certification.unverified"
        };
        self.record(admin, action, certification_id, Some(therapist_id.to_owned()))
            .await;
        Ok(updated)
    }

    pub async fn moderate_therapist(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Therapist, DomainError> {
        let admin = require_role(ctx, Role::Admin)?;
        let mut therapist = self.load_therapist(therapist_id).await?;
        let from = therapist.account_status;
        let next = transition(from, decision.into())?;
        let note = non_empty(note);
        apply_decision(
            &mut therapist.account_status,
            &mut therapist.admin_notes,
            &mut therapist.membership,
            next,
            note.clone(),
        );
        self.ports.profiles.put(therapist.clone()).await?;

        info!(admin_id = admin, therapist_id, %from, to = %next, "therapist moderation decision");
        self.record(admin, &decision_action("therapist", decision), therapist_id, note)
            .await;
        Ok(therapist)
    }

    // === Clinic ===

    /// Caller's clinic; a draft is created on first visit.
    pub async fn ensure_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, DomainError> {
        let uid = require_role(ctx, Role::ClinicOwner)?;
        if let Some(existing) = self.ports.clinics.get(uid).await? {
            return Ok(existing);
        }
        let draft = Clinic::draft(uid, uid);
        self.ports.clinics.put(draft.clone()).await?;
        info!(clinic_id = uid, "created draft clinic");
        Ok(draft)
    }

    pub async fn update_clinic(
        &self,
        ctx: &SecurityContext,
        patch: ClinicPatch,
    ) -> Result<Clinic, DomainError> {
        validate_clinic_patch(&patch)?;
        let mut clinic = self.ensure_clinic(ctx).await?;
        self.check_owned_files(
            &clinic.owner_id,
            [("paymentReceiptUrl", patch.payment_receipt_url.as_deref())],
        )?;
        let replaced = apply_clinic_patch(&mut clinic, patch);
        self.ports.clinics.put(clinic.clone()).await?;
        self.delete_files(&clinic.owner_id, replaced).await;
        Ok(clinic)
    }

    pub async fn submit_clinic(&self, ctx: &SecurityContext) -> Result<Clinic, DomainError> {
        let mut clinic = self.ensure_clinic(ctx).await?;
        if clinic.name.trim().is_empty() {
            return Err(DomainError::validation(
                "name",
                "required before submitting for review",
            ));
        }
        if clinic.address.trim().is_empty() {
            return Err(DomainError::validation(
                "address",
                "required before submitting for review",
            ));
        }

        let from = clinic.account_status;
        clinic.account_status = transition(from, LifecycleAction::Submit)?;
        clinic
            .membership
            .get_or_insert_with(MembershipApplication::default)
            .applied_at = Some(OffsetDateTime::now_utc());
        self.ports.clinics.put(clinic.clone()).await?;

        info!(clinic_id = %clinic.id, %from, "clinic submitted for review");
        self.record(&clinic.owner_id, "clinic.submitted", &clinic.id, None)
            .await;
        Ok(clinic)
    }

    pub async fn moderate_clinic(
        &self,
        ctx: &SecurityContext,
        clinic_id: &str,
        decision: ModerationDecision,
        note: Option<String>,
    ) -> Result<Clinic, DomainError> {
        let admin = require_role(ctx, Role::Admin)?;
        let mut clinic = self
            .ports
            .clinics
            .get(clinic_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Clinic", clinic_id))?;
        let from = clinic.account_status;
        let next = transition(from, decision.into())?;
        let note = non_empty(note);
        apply_decision(
            &mut clinic.account_status,
            &mut clinic.admin_notes,
            &mut clinic.membership,
            next,
            note.clone(),
        );
        self.ports.clinics.put(clinic.clone()).await?;

        info!(admin_id = admin, clinic_id, %from, to = %next, "clinic moderation decision");
        self.record(admin, &decision_action("clinic", decision), clinic_id, note)
            .await;
        Ok(clinic)
    }

    pub async fn add_space_listing(
        &self,
        ctx: &SecurityContext,
        new: NewSpaceListing,
    ) -> Result<ClinicSpaceListing, DomainError> {
        let name = required_text("name", &new.name, MAX_NAME_LEN)?;
        if !new.rental_price.is_finite() || new.rental_price < 0.0 {
            return Err(DomainError::validation(
                "rentalPrice",
                "must be a non-negative amount",
            ));
        }

        let mut clinic = self.ensure_clinic(ctx).await?;
        self.check_owned_files(
            &clinic.owner_id,
            new.photos.iter().map(|p| ("photos", Some(p.as_str()))),
        )?;
        let listing = ClinicSpaceListing {
            id: Uuid::new_v4().to_string(),
            clinic_id: clinic.id.clone(),
            clinic_name: clinic.name.clone(),
            clinic_address: clinic.address.clone(),
            name,
            description: new.description,
            photos: new.photos,
            rental_price: new.rental_price,
            rental_duration: new.rental_duration,
            rental_terms: new.rental_terms,
            features: new.features,
        };
        clinic.listings.push(listing.clone());
        self.ports.clinics.put(clinic).await?;
        info!(clinic_id = %listing.clinic_id, listing_id = %listing.id, "space listing added");
        Ok(listing)
    }

    /// Remove a listing and the photos it referenced.
    pub async fn remove_space_listing(
        &self,
        ctx: &SecurityContext,
        listing_id: &str,
    ) -> Result<(), DomainError> {
        let mut clinic = self.ensure_clinic(ctx).await?;
        let pos = clinic
            .listings
            .iter()
            .position(|l| l.id == listing_id)
            .ok_or_else(|| DomainError::not_found("Space listing", listing_id))?;
        let removed = clinic.listings.remove(pos);
        let owner_id = clinic.owner_id.clone();
        self.ports.clinics.put(clinic).await?;
        info!(listing_id, photos = removed.photos.len(), "space listing removed");
        self.delete_files(&owner_id, removed.photos).await;
        Ok(())
    }

    // === Uploads ===

    /// Validate then store a file under the caller's folder.
    ///
    /// The size checked is the received byte count, not the declared one.
    pub async fn upload_file(
        &self,
        ctx: &SecurityContext,
        kind: UploadKind,
        candidate: FileCandidate,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, DomainError> {
        let owner = require_authenticated(ctx)?;
        let allowed = upload_roles(kind);
        if !allowed.iter().any(|r| ctx.has_role(*r)) {
            return Err(DomainError::Forbidden {
                required: allowed[0],
            });
        }

        let candidate = FileCandidate {
            size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            ..candidate
        };
        if let Err(e) = self.uploads.validate(kind, &candidate) {
            info!(owner_id = owner, %kind, error = %e, "upload rejected");
            return Err(e);
        }

        let path = storage_path(owner, kind, &candidate.file_name);
        let url = self
            .ports
            .storage
            .upload(&path, bytes, &candidate.content_type)
            .await?;
        info!(owner_id = owner, %kind, size = candidate.size_bytes, "file uploaded");
        Ok(StoredFile { path, url })
    }

    // === Inquiries ===

    /// Anyone may write in; signed-in users are linked to the inquiry.
    pub async fn create_inquiry(
        &self,
        ctx: &SecurityContext,
        new: NewInquiry,
    ) -> Result<UserInquiry, DomainError> {
        let email = if new.email.trim().is_empty() {
            ctx.email().unwrap_or_default().to_owned()
        } else {
            new.email.trim().to_owned()
        };
        if !looks_like_email(&email) {
            return Err(DomainError::validation("email", "a valid email is required"));
        }
        let subject = required_text("subject", &new.subject, MAX_SUBJECT_LEN)?;
        let message = required_text("message", &new.message, MAX_MESSAGE_LEN)?;

        let inquiry = UserInquiry {
            id: Uuid::new_v4().to_string(),
            user_id: ctx.subject_id().map(str::to_owned),
            email,
            subject,
            message,
            status: InquiryStatus::Open,
            admin_reply: None,
            created_at: OffsetDateTime::now_utc(),
        };
        self.ports.inquiries.put(inquiry.clone()).await?;
        info!(inquiry_id = %inquiry.id, "inquiry received");
        Ok(inquiry)
    }

    pub async fn list_inquiries(
        &self,
        ctx: &SecurityContext,
        status: Option<InquiryStatus>,
    ) -> Result<Vec<UserInquiry>, DomainError> {
        require_role(ctx, Role::Admin)?;
        Ok(self.ports.inquiries.list(status).await?)
    }

    pub async fn update_inquiry_status(
        &self,
        ctx: &SecurityContext,
        inquiry_id: &str,
        status: InquiryStatus,
        reply: Option<String>,
    ) -> Result<UserInquiry, DomainError> {
        let admin = require_role(ctx, Role::Admin)?;
        let mut inquiry = self
            .ports
            .inquiries
            .get(inquiry_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Inquiry", inquiry_id))?;
        if !inquiry.status.can_transition_to(status) {
            return Err(DomainError::invalid_transition(
                inquiry.status,
                format!("move inquiry to '{status}'"),
            ));
        }

        let from = inquiry.status;
        inquiry.status = status;
        if let Some(reply) = non_empty(reply) {
            inquiry.admin_reply = Some(reply);
        }
        self.ports.inquiries.put(inquiry.clone()).await?;

        info!(admin_id = admin, inquiry_id, %from, to = %status, "inquiry status changed");
        self.record(admin, &format!("inquiry.{status}"), inquiry_id, None)
            .await;
        Ok(inquiry)
    }

    // === Dashboards ===

    pub async fn admin_overview(&self, ctx: &SecurityContext) -> Result<AdminOverview, DomainError> {
        require_role(ctx, Role::Admin)?;
        Ok(AdminOverview {
            pending_therapists: self
                .ports
                .profiles
                .list_by_status(LifecycleStatus::PendingApproval)
                .await?,
            pending_clinics: self
                .ports
                .clinics
                .list_by_status(LifecycleStatus::PendingApproval)
                .await?,
            open_inquiries: self.ports.inquiries.list(Some(InquiryStatus::Open)).await?,
            recent_activity: self.ports.activity.recent(RECENT_ACTIVITY).await?,
        })
    }

    /// Live therapists the client saved, in name order. Saved profiles that
    /// are gone or no longer live are left out.
    pub async fn client_favorites(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<Therapist>, DomainError> {
        require_role(ctx, Role::Client)?;
        let ids = self.discovery.list_favorites(ctx).await?;
        let mut favorites = Vec::with_capacity(ids.len());
        for id in ids {
            match self.discovery.get_live_therapist(ctx, &id).await {
                Ok(therapist) => favorites.push(therapist),
                Err(DiscoveryError::NotFound { .. } | DiscoveryError::NotLive { .. }) => {
                    debug!(therapist_id = %id, "saved therapist is no longer listed");
                }
                Err(e) => return Err(e.into()),
            }
        }
        favorites.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(favorites)
    }

    // === Helpers ===

    async fn load_therapist(&self, id: &str) -> Result<Therapist, DomainError> {
        self.ports
            .profiles
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Therapist", id))
    }

    /// Audit entries are best-effort; the change they describe is already stored.
    async fn record(&self, actor_id: &str, action: &str, target_id: &str, details: Option<String>) {
        let entry = ActivityLog {
            id: Uuid::new_v4().to_string(),
            actor_id: actor_id.to_owned(),
            action: action.to_owned(),
            target_id: target_id.to_owned(),
            details,
            at: OffsetDateTime::now_utc(),
        };
        if let Err(e) = self.ports.activity.append(entry).await {
            warn!(action, target_id, error = %e, "activity log write failed");
        }
    }

    /// Whether `url` addresses a stored object under `owner_id`'s folder.
    fn owns_file(&self, owner_id: &str, url: &str) -> bool {
        self.ports.storage.object_path(url).is_some_and(|path| {
            path.strip_prefix(owner_id)
                .is_some_and(|rest| rest.starts_with('/'))
                && !path.split('/').any(|segment| segment == "..")
        })
    }

    /// Media references written into a document must point at the owner's uploads.
    fn check_owned_files<'a>(
        &self,
        owner_id: &str,
        urls: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
    ) -> Result<(), DomainError> {
        for (field, url) in urls {
            let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
                continue;
            };
            if !self.owns_file(owner_id, url) {
                return Err(DomainError::validation(
                    field,
                    "must reference a file uploaded by this account",
                ));
            }
        }
        Ok(())
    }

    async fn delete_files(&self, owner_id: &str, urls: impl IntoIterator<Item = String>) {
        for url in urls {
            if !self.owns_file(owner_id, &url) {
                warn!(owner_id, %url, "skipping delete of a file outside the owner's folder");
                continue;
            }
            match self.ports.storage.delete(&url).await {
                Ok(()) => debug!(%url, "deleted stored file"),
                Err(e) => warn!(%url, error = %e, "failed to delete stored file"),
            }
        }
    }
}

fn upload_roles(kind: UploadKind) -> &'static [Role] {
    match kind {
        UploadKind::ProfilePicture | UploadKind::IntroVideo | UploadKind::CertificationFile => {
            &[Role::Therapist]
        }
        UploadKind::ClinicPhoto | UploadKind::SpacePhoto => &[Role::ClinicOwner],
        UploadKind::PaymentReceipt => &[Role::Therapist, Role::ClinicOwner],
    }
}

fn decision_action(entity: &str, decision: ModerationDecision) -> String {
    let verb = match decision {
        ModerationDecision::Approve => "approved",
        ModerationDecision::Reject => "rejected",
    };
    format!("{entity}.{verb}")
}

fn apply_decision(
    status: &mut LifecycleStatus,
    admin_notes: &mut Option<String>,
    membership: &mut Option<MembershipApplication>,
    next: LifecycleStatus,
    note: Option<String>,
) {
    *status = next;
    if note.is_some() {
        *admin_notes = note;
    }
    if next == LifecycleStatus::Live {
        membership
            .get_or_insert_with(MembershipApplication::default)
            .renewal_due_at = Some(OffsetDateTime::now_utc() + MEMBERSHIP_TERM);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max_len}"),
        ));
    }
    Ok(value.to_owned())
}

fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        && !email.contains(char::is_whitespace)
}

fn validate_whatsapp(field: &str, number: Option<&str>) -> Result<(), DomainError> {
    let Some(number) = number.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(());
    };
    let digits = number.chars().filter(char::is_ascii_digit).count();
    let allowed = number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
    if !allowed || digits < 7 {
        return Err(DomainError::validation(
            field,
            "must be a phone number in international format",
        ));
    }
    Ok(())
}

fn validate_therapist_patch(patch: &TherapistPatch) -> Result<(), DomainError> {
    if let Some(name) = &patch.name {
        required_text("name", name, MAX_NAME_LEN)?;
    }
    if patch
        .bio
        .as_ref()
        .is_some_and(|b| b.chars().count() > MAX_BIO_LEN)
    {
        return Err(DomainError::validation(
            "bio",
            format!("exceeds maximum length of {MAX_BIO_LEN}"),
        ));
    }
    if let Some(locations) = &patch.locations {
        if locations.iter().any(|l| l.address.trim().is_empty()) {
            return Err(DomainError::validation("locations", "address is required"));
        }
        if locations
            .iter()
            .filter_map(|l| l.coordinates)
            .any(|c| !c.is_valid())
        {
            return Err(DomainError::validation(
                "locations",
                "coordinates are out of range",
            ));
        }
    }
    validate_whatsapp("whatsappNumber", patch.whatsapp_number.as_deref())
}

fn validate_clinic_patch(patch: &ClinicPatch) -> Result<(), DomainError> {
    if let Some(name) = &patch.name {
        required_text("name", name, MAX_NAME_LEN)?;
    }
    validate_whatsapp("whatsappNumber", patch.whatsapp_number.as_deref())
}

/// Set a media URL slot. An empty string clears it; the previous URL is
/// pushed to `replaced` when it changes.
fn replace_media(slot: &mut Option<String>, update: Option<&str>, replaced: &mut Vec<String>) {
    let Some(update) = update else {
        return;
    };
    let next = optional_text(update);
    if *slot != next {
        if let Some(old) = slot.take() {
            replaced.push(old);
        }
        *slot = next;
    }
}

fn optional_text(update: &str) -> Option<String> {
    Some(update.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Apply a patch and return the URLs of files it replaced.
fn apply_therapist_patch(t: &mut Therapist, patch: TherapistPatch) -> Vec<String> {
    let mut replaced = Vec::new();
    if let Some(name) = patch.name {
        t.name = name.trim().to_owned();
    }
    if let Some(bio) = patch.bio {
        t.bio = bio;
    }
    replace_media(
        &mut t.profile_picture_url,
        patch.profile_picture_url.as_deref(),
        &mut replaced,
    );
    replace_media(
        &mut t.intro_video_url,
        patch.intro_video_url.as_deref(),
        &mut replaced,
    );
    if let Some(v) = patch.specializations {
        t.specializations = v;
    }
    if let Some(v) = patch.other_specializations {
        t.other_specializations = optional_text(&v);
    }
    if let Some(v) = patch.languages {
        t.languages = v;
    }
    if let Some(v) = patch.other_languages {
        t.other_languages = optional_text(&v);
    }
    if let Some(v) = patch.qualifications {
        t.qualifications = v;
    }
    if let Some(v) = patch.availability {
        t.availability = v;
    }
    if let Some(v) = patch.locations {
        t.locations = v;
    }
    if let Some(v) = patch.whatsapp_number {
        t.whatsapp_number = optional_text(&v);
    }
    if patch.payment_receipt_url.is_some() {
        let membership = t
            .membership
            .get_or_insert_with(MembershipApplication::default);
        replace_media(
            &mut membership.payment_receipt_url,
            patch.payment_receipt_url.as_deref(),
            &mut replaced,
        );
    }
    replaced
}

fn apply_clinic_patch(c: &mut Clinic, patch: ClinicPatch) -> Vec<String> {
    let mut replaced = Vec::new();
    if let Some(name) = patch.name {
        c.name = name.trim().to_owned();
    }
    if let Some(v) = patch.description {
        c.description = v;
    }
    if let Some(v) = patch.address {
        c.address = v.trim().to_owned();
    }
    if let Some(v) = patch.amenities {
        c.amenities = v;
    }
    if let Some(v) = patch.operating_hours {
        c.operating_hours = v;
    }
    if let Some(v) = patch.whatsapp_number {
        c.whatsapp_number = optional_text(&v);
    }
    if patch.payment_receipt_url.is_some() {
        let membership = c
            .membership
            .get_or_insert_with(MembershipApplication::default);
        replace_media(
            &mut membership.payment_receipt_url,
            patch.payment_receipt_url.as_deref(),
            &mut replaced,
        );
    }
    // Listings carry a copy of the clinic name and address.
    for listing in &mut c.listings {
        listing.clinic_name.clone_from(&c.name);
        listing.clinic_address.clone_from(&c.address);
    }
    replaced
}
