#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Listing lifecycle, uploads and inquiries against the in-memory stores.

use std::sync::Arc;

use discovery::DiscoveryModule;
use discovery::config::DiscoveryConfig;
use discovery::infra::storage::{InMemoryFavoritesStore, InMemoryTherapistStore};
use discovery_sdk::{Filters, LifecycleStatus, ViewMode};
use marketplace::config::MarketplaceConfig;
use marketplace::domain::error::DomainError;
use marketplace::domain::service::{Ports, Service};
use marketplace::infra::storage::{
    InMemoryActivityLog, InMemoryClinicStore, InMemoryInquiryStore, InMemoryObjectStorage,
};
use marketplace_sdk::{
    ClinicPatch, FileCandidate, InquiryStatus, ModerationDecision, NewCertification, NewInquiry,
    NewSpaceListing, TherapistPatch, UploadKind,
};
use tw_security::{Role, SecurityContext};

const MIB: u64 = 1024 * 1024;

struct Fixture {
    therapists: Arc<InMemoryTherapistStore>,
    storage: Arc<InMemoryObjectStorage>,
    activity: Arc<InMemoryActivityLog>,
    discovery: DiscoveryModule,
    service: Service,
}

fn fixture() -> Fixture {
    let therapists = Arc::new(InMemoryTherapistStore::new());
    let storage = Arc::new(InMemoryObjectStorage::default());
    let activity = Arc::new(InMemoryActivityLog::new());
    let discovery = DiscoveryModule::new(
        DiscoveryConfig::default(),
        therapists.clone(),
        Arc::new(InMemoryFavoritesStore::new()),
    );
    let ports = Ports {
        profiles: therapists.clone(),
        clinics: Arc::new(InMemoryClinicStore::new()),
        inquiries: Arc::new(InMemoryInquiryStore::new()),
        activity: activity.clone(),
        storage: storage.clone(),
    };
    let service = Service::new(ports, discovery.client(), &MarketplaceConfig::default());
    Fixture {
        therapists,
        storage,
        activity,
        discovery,
        service,
    }
}

fn therapist(id: &str) -> SecurityContext {
    SecurityContext::user(id, &[Role::Client, Role::Therapist])
}

fn clinic_owner(id: &str) -> SecurityContext {
    SecurityContext::user(id, &[Role::ClinicOwner])
}

fn admin() -> SecurityContext {
    SecurityContext::user("admin-1", &[Role::Admin])
}

fn file(name: &str, content_type: &str) -> FileCandidate {
    FileCandidate {
        file_name: name.to_owned(),
        content_type: content_type.to_owned(),
        size_bytes: 0,
    }
}

fn bytes(len: u64) -> Vec<u8> {
    vec![0xAB; usize::try_from(len).unwrap()]
}

async fn complete_profile(f: &Fixture, ctx: &SecurityContext, name: &str) {
    f.service
        .update_therapist_profile(
            ctx,
            TherapistPatch {
                name: Some(name.to_owned()),
                bio: Some("Helping adults with anxiety.".to_owned()),
                specializations: Some(vec!["Anxiety Counseling".to_owned()]),
                ..TherapistPatch::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn therapist_lifecycle_from_draft_to_live() {
    let f = fixture();
    let ctx = therapist("t1");

    let draft = f.service.ensure_therapist_profile(&ctx).await.unwrap();
    assert_eq!(draft.account_status, LifecycleStatus::Draft);
    assert_eq!(
        f.service.ensure_therapist_profile(&ctx).await.unwrap(),
        draft
    );

    complete_profile(&f, &ctx, "Amal").await;
    let pending = f.service.submit_therapist_profile(&ctx).await.unwrap();
    assert_eq!(pending.account_status, LifecycleStatus::PendingApproval);
    assert!(pending.membership.unwrap().applied_at.is_some());

    let overview = f.service.admin_overview(&admin()).await.unwrap();
    assert_eq!(overview.pending_therapists.len(), 1);

    let rejected = f
        .service
        .moderate_therapist(
            &admin(),
            "t1",
            ModerationDecision::Reject,
            Some("Please add a profile picture".to_owned()),
        )
        .await
        .unwrap();
    assert_eq!(rejected.account_status, LifecycleStatus::Rejected);
    assert_eq!(
        rejected.admin_notes.as_deref(),
        Some("Please add a profile picture")
    );

    f.service.submit_therapist_profile(&ctx).await.unwrap();
    let live = f
        .service
        .moderate_therapist(&admin(), "t1", ModerationDecision::Approve, None)
        .await
        .unwrap();
    assert_eq!(live.account_status, LifecycleStatus::Live);
    assert!(live.membership.unwrap().renewal_due_at.is_some());
    // The earlier note stays until an admin replaces it.
    assert!(live.admin_notes.is_some());

    let page = f
        .discovery
        .service()
        .search(
            &SecurityContext::anonymous(),
            &Filters::default(),
            ViewMode::Grid,
            None,
        )
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Amal");

    let actions: Vec<String> = f.activity.entries().into_iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            "therapist.submitted",
            "therapist.rejected",
            "therapist.submitted",
            "therapist.approved"
        ]
    );
}

#[tokio::test]
async fn moderation_only_applies_to_pending_listings() {
    let f = fixture();
    let ctx = therapist("t1");
    complete_profile(&f, &ctx, "Amal").await;

    let err = f
        .service
        .moderate_therapist(&admin(), "t1", ModerationDecision::Approve, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));

    f.service.submit_therapist_profile(&ctx).await.unwrap();
    let err = f.service.submit_therapist_profile(&ctx).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));

    let err = f
        .service
        .moderate_therapist(&ctx, "t1", ModerationDecision::Approve, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::Forbidden {
            required: Role::Admin
        }
    );

    let err = f
        .service
        .moderate_therapist(&admin(), "missing", ModerationDecision::Approve, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn incomplete_profile_cannot_be_submitted() {
    let f = fixture();
    let ctx = therapist("t1");
    let err = f.service.submit_therapist_profile(&ctx).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
    assert_eq!(
        f.therapists.find("t1").unwrap().account_status,
        LifecycleStatus::Draft
    );
}

#[tokio::test]
async fn profile_locations_keep_a_single_primary() {
    let f = fixture();
    let ctx = therapist("t1");
    let patch: TherapistPatch = serde_json::from_value(serde_json::json!({
        "locations": [
            { "address": "Zamalek", "isPrimary": false },
            { "address": "Maadi", "isPrimary": true, "coordinates": { "lat": 29.96, "lng": 31.25 } },
            { "address": "Heliopolis", "isPrimary": true }
        ]
    }))
    .unwrap();
    let t = f.service.update_therapist_profile(&ctx, patch).await.unwrap();
    let primaries: Vec<&str> = t
        .locations
        .iter()
        .filter(|l| l.is_primary)
        .map(|l| l.address.as_str())
        .collect();
    assert_eq!(primaries, vec!["Maadi"]);

    let bad: TherapistPatch = serde_json::from_value(serde_json::json!({
        "locations": [{ "address": "Nowhere", "coordinates": { "lat": 95.0, "lng": 0.0 } }]
    }))
    .unwrap();
    assert!(matches!(
        f.service.update_therapist_profile(&ctx, bad).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn invalid_files_never_reach_storage() {
    let f = fixture();
    let ctx = therapist("t1");

    let too_big = f
        .service
        .upload_file(
            &ctx,
            UploadKind::ProfilePicture,
            file("me.png", "image/png"),
            bytes(5 * MIB + 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(too_big, DomainError::FileRejected { .. }));

    let wrong_type = f
        .service
        .upload_file(
            &ctx,
            UploadKind::IntroVideo,
            file("intro.exe", "application/octet-stream"),
            bytes(10),
        )
        .await
        .unwrap_err();
    assert!(matches!(wrong_type, DomainError::FileRejected { .. }));

    let anonymous = f
        .service
        .upload_file(
            &SecurityContext::anonymous(),
            UploadKind::ProfilePicture,
            file("me.png", "image/png"),
            bytes(10),
        )
        .await
        .unwrap_err();
    assert_eq!(anonymous, DomainError::AuthRequired);

    let wrong_role = f
        .service
        .upload_file(
            &ctx,
            UploadKind::SpacePhoto,
            file("room.png", "image/png"),
            bytes(10),
        )
        .await
        .unwrap_err();
    assert!(matches!(wrong_role, DomainError::Forbidden { .. }));

    assert_eq!(f.storage.upload_count(), 0);

    let stored = f
        .service
        .upload_file(
            &ctx,
            UploadKind::IntroVideo,
            file("intro.mp4", "video/mp4"),
            bytes(6 * MIB),
        )
        .await
        .unwrap();
    assert!(stored.path.starts_with("t1/intro_videos/"));
    assert!(f.storage.contains_url(&stored.url));
    assert_eq!(f.storage.upload_count(), 1);
}

#[tokio::test]
async fn replacing_media_deletes_the_old_file() {
    let f = fixture();
    let ctx = therapist("t1");
    let mut urls = Vec::new();
    for name in ["one.png", "two.png"] {
        let stored = f
            .service
            .upload_file(
                &ctx,
                UploadKind::ProfilePicture,
                file(name, "image/png"),
                bytes(64),
            )
            .await
            .unwrap();
        f.service
            .update_therapist_profile(
                &ctx,
                TherapistPatch {
                    profile_picture_url: Some(stored.url.clone()),
                    ..TherapistPatch::default()
                },
            )
            .await
            .unwrap();
        urls.push(stored.url);
    }

    assert!(!f.storage.contains_url(&urls[0]));
    assert!(f.storage.contains_url(&urls[1]));
    assert_eq!(f.storage.len(), 1);
}

#[tokio::test]
async fn certifications_are_added_verified_and_removed_with_their_file() {
    let f = fixture();
    let ctx = therapist("t1");
    let upload = f
        .service
        .upload_file(
            &ctx,
            UploadKind::CertificationFile,
            file("license.pdf", "application/pdf"),
            bytes(128),
        )
        .await
        .unwrap();

    let cert = f
        .service
        .add_certification(
            &ctx,
            NewCertification {
                name: "Licensed Psychologist".to_owned(),
                issuer: "Ministry of Health".to_owned(),
                file_url: Some(upload.url.clone()),
            },
        )
        .await
        .unwrap();
    assert!(!cert.verified);

    let verified = f
        .service
        .verify_certification(&admin(), "t1", &cert.id, true)
        .await
        .unwrap();
    assert!(verified.verified);

    f.service.remove_certification(&ctx, &cert.id).await.unwrap();
    assert!(f.storage.is_empty());
    assert!(f.therapists.find("t1").unwrap().certifications.is_empty());
    assert!(matches!(
        f.service.remove_certification(&ctx, &cert.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn files_of_another_account_cannot_be_referenced_or_deleted() {
    let f = fixture();
    let owner = therapist("t-owner");
    let other = therapist("t-other");
    let picture = f
        .service
        .upload_file(
            &owner,
            UploadKind::ProfilePicture,
            file("me.png", "image/png"),
            bytes(64),
        )
        .await
        .unwrap();

    let cert = f
        .service
        .add_certification(
            &other,
            NewCertification {
                name: "Licensed Psychologist".to_owned(),
                issuer: "Ministry of Health".to_owned(),
                file_url: Some(picture.url.clone()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(cert, DomainError::Validation { ref field, .. } if field == "fileUrl"));

    let patch = f
        .service
        .update_therapist_profile(
            &other,
            TherapistPatch {
                profile_picture_url: Some(picture.url.clone()),
                ..TherapistPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(
        matches!(patch, DomainError::Validation { ref field, .. } if field == "profilePictureUrl")
    );

    let foreign = f
        .service
        .update_therapist_profile(
            &other,
            TherapistPatch {
                intro_video_url: Some("https://cdn.example.com/t-other/v.mp4".to_owned()),
                ..TherapistPatch::default()
            },
        )
        .await;
    assert!(matches!(foreign, Err(DomainError::Validation { .. })));

    let room = f
        .service
        .add_space_listing(
            &clinic_owner("c-other"),
            NewSpaceListing {
                name: "Room".to_owned(),
                photos: vec![picture.url.clone()],
                ..NewSpaceListing::default()
            },
        )
        .await;
    assert!(matches!(room, Err(DomainError::Validation { ref field, .. }) if field == "photos"));

    assert!(f.storage.contains_url(&picture.url));
    assert!(f.therapists.find("t-other").unwrap().certifications.is_empty());
}

#[tokio::test]
async fn clinic_lifecycle_and_space_listings() {
    let f = fixture();
    let owner = clinic_owner("c1");

    let clinic = f.service.ensure_clinic(&owner).await.unwrap();
    assert_eq!(clinic.account_status, LifecycleStatus::Draft);
    assert_eq!(clinic.owner_id, "c1");

    f.service
        .update_clinic(
            &owner,
            ClinicPatch {
                name: Some("Nile Rooms".to_owned()),
                ..ClinicPatch::default()
            },
        )
        .await
        .unwrap();
    let err = f.service.submit_clinic(&owner).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "address"));

    f.service
        .update_clinic(
            &owner,
            ClinicPatch {
                address: Some("12 Tahrir St, Cairo".to_owned()),
                ..ClinicPatch::default()
            },
        )
        .await
        .unwrap();

    let mut photos = Vec::new();
    for name in ["a.jpg", "b.jpg"] {
        let stored = f
            .service
            .upload_file(
                &owner,
                UploadKind::SpacePhoto,
                file(name, "image/jpeg"),
                bytes(256),
            )
            .await
            .unwrap();
        photos.push(stored.url);
    }
    let listing = f
        .service
        .add_space_listing(
            &owner,
            NewSpaceListing {
                name: "Therapy Room A".to_owned(),
                photos: photos.clone(),
                rental_price: 350.0,
                rental_duration: "hour".to_owned(),
                ..NewSpaceListing::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(listing.clinic_name, "Nile Rooms");
    assert_eq!(listing.clinic_address, "12 Tahrir St, Cairo");
    assert_eq!(f.storage.len(), 2);

    let negative = f
        .service
        .add_space_listing(
            &owner,
            NewSpaceListing {
                name: "Room B".to_owned(),
                rental_price: -1.0,
                ..NewSpaceListing::default()
            },
        )
        .await;
    assert!(matches!(negative, Err(DomainError::Validation { .. })));

    f.service
        .remove_space_listing(&owner, &listing.id)
        .await
        .unwrap();
    assert!(f.storage.is_empty());
    assert!(f.service.ensure_clinic(&owner).await.unwrap().listings.is_empty());

    let pending = f.service.submit_clinic(&owner).await.unwrap();
    assert_eq!(pending.account_status, LifecycleStatus::PendingApproval);
    let live = f
        .service
        .moderate_clinic(&admin(), "c1", ModerationDecision::Approve, Some("Welcome".to_owned()))
        .await
        .unwrap();
    assert_eq!(live.account_status, LifecycleStatus::Live);
    assert_eq!(live.admin_notes.as_deref(), Some("Welcome"));

    // Renewal: a live clinic goes back to review.
    let renewal = f.service.submit_clinic(&owner).await.unwrap();
    assert_eq!(renewal.account_status, LifecycleStatus::PendingApproval);
}

#[tokio::test]
async fn inquiries_move_from_open_once() {
    let f = fixture();
    let visitor = SecurityContext::anonymous();

    let inquiry = f
        .service
        .create_inquiry(
            &visitor,
            NewInquiry {
                email: "visitor@example.com".to_owned(),
                subject: "Clinic partnership".to_owned(),
                message: "How do I list my clinic?".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(inquiry.status, InquiryStatus::Open);
    assert_eq!(inquiry.user_id, None);

    let bad = f
        .service
        .create_inquiry(
            &visitor,
            NewInquiry {
                email: "not-an-email".to_owned(),
                subject: "x".to_owned(),
                message: "y".to_owned(),
            },
        )
        .await;
    assert!(matches!(bad, Err(DomainError::Validation { .. })));

    assert!(matches!(
        f.service.list_inquiries(&therapist("t1"), None).await,
        Err(DomainError::Forbidden { .. })
    ));
    assert_eq!(
        f.service
            .list_inquiries(&admin(), Some(InquiryStatus::Open))
            .await
            .unwrap()
            .len(),
        1
    );

    let closed = f
        .service
        .update_inquiry_status(
            &admin(),
            &inquiry.id,
            InquiryStatus::Closed,
            Some("See the clinic dashboard.".to_owned()),
        )
        .await
        .unwrap();
    assert_eq!(closed.status, InquiryStatus::Closed);
    assert_eq!(
        closed.admin_reply.as_deref(),
        Some("See the clinic dashboard.")
    );

    let err = f
        .service
        .update_inquiry_status(&admin(), &inquiry.id, InquiryStatus::Escalated, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
    assert!(
        f.service
            .admin_overview(&admin())
            .await
            .unwrap()
            .open_inquiries
            .is_empty()
    );
}

#[tokio::test]
async fn signed_in_inquiry_defaults_to_account_email() {
    let f = fixture();
    let ctx = SecurityContext::builder()
        .subject_id("u7")
        .email("u7@example.com")
        .role(Role::Client)
        .build();
    let inquiry = f
        .service
        .create_inquiry(
            &ctx,
            NewInquiry {
                email: String::new(),
                subject: "Billing".to_owned(),
                message: "Receipt question".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(inquiry.email, "u7@example.com");
    assert_eq!(inquiry.user_id.as_deref(), Some("u7"));
}
