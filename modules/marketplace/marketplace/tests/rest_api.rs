#![allow(clippy::unwrap_used, clippy::expect_used)]

//! REST tests over the discovery and marketplace routers merged as the server does.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use discovery::DiscoveryModule;
use discovery::config::DiscoveryConfig;
use discovery::infra::storage::{InMemoryFavoritesStore, InMemoryTherapistStore};
use discovery_sdk::{LifecycleStatus, Therapist};
use http_body_util::BodyExt;
use marketplace::MarketplaceModule;
use marketplace::config::MarketplaceConfig;
use marketplace::domain::locale::LocaleCatalog;
use marketplace::domain::service::Ports;
use marketplace::infra::storage::{
    InMemoryActivityLog, InMemoryClinicStore, InMemoryInquiryStore, InMemoryObjectStorage,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use tw_security::extract::{USER_ID_HEADER, USER_ROLES_HEADER};

struct App {
    router: Router,
    storage: Arc<InMemoryObjectStorage>,
}

fn strings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn app() -> App {
    let mut favorite = Therapist::draft("fav", "Zeina");
    favorite.account_status = LifecycleStatus::Live;
    let therapists = Arc::new(InMemoryTherapistStore::with_therapists([favorite]));
    let favorites = Arc::new(InMemoryFavoritesStore::new());
    favorites.seed("client-1", &["fav"]);
    let storage = Arc::new(InMemoryObjectStorage::default());

    let discovery = DiscoveryModule::new(DiscoveryConfig::default(), therapists.clone(), favorites);
    let ports = Ports {
        profiles: therapists,
        clinics: Arc::new(InMemoryClinicStore::new()),
        inquiries: Arc::new(InMemoryInquiryStore::new()),
        activity: Arc::new(InMemoryActivityLog::new()),
        storage: storage.clone(),
    };
    let locales = LocaleCatalog::new()
        .with_table(
            "en",
            strings(&[("nav.find", "Find a therapist"), ("nav.home", "Home")]),
        )
        .with_table("ar", strings(&[("nav.home", "الرئيسية")]));
    let cfg = MarketplaceConfig {
        max_image_mb: 1,
        ..MarketplaceConfig::default()
    };
    let marketplace = MarketplaceModule::with_locales(&cfg, ports, discovery.client(), locales);

    App {
        router: discovery.router().merge(marketplace.router()),
        storage,
    }
}

fn request(
    method: Method,
    uri: &str,
    user: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((id, roles)) = user {
        builder = builder
            .header(USER_ID_HEADER, id)
            .header(USER_ROLES_HEADER, roles);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn upload(kind: &str, user: (&str, &str), content_type: &str, len: usize) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/uploads/{kind}"))
        .header(USER_ID_HEADER, user.0)
        .header(USER_ROLES_HEADER, user.1)
        .header(header::CONTENT_TYPE, content_type)
        .header("x-file-name", "portrait.png")
        .body(Body::from(vec![7_u8; len]))
        .unwrap()
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn location(router: &Router, req: Request<Body>) -> (StatusCode, Option<String>) {
    let response = router.clone().oneshot(req).await.unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    (response.status(), location)
}

const THERAPIST: (&str, &str) = ("t1", "client,therapist");
const ADMIN: (&str, &str) = ("admin-1", "admin");

#[tokio::test]
async fn dashboard_redirects_by_highest_role() {
    let app = app();
    let cases = [
        ("therapist,client", "/dashboard/therapist"),
        ("client,clinic_owner", "/dashboard/clinic"),
        ("admin,therapist", "/dashboard/admin"),
        ("client", "/dashboard/client"),
        ("", "/dashboard/client"),
    ];
    for (roles, expected) in cases {
        let (status, to) = location(
            &app.router,
            request(Method::GET, "/dashboard", Some(("u1", roles)), None),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER, "roles {roles:?}");
        assert_eq!(to.as_deref(), Some(expected), "roles {roles:?}");

        let (status, json) = send(
            &app.router,
            request(Method::GET, expected, Some(("u1", roles)), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "roles {roles:?}: {json}");
    }

    let (status, json) = send(&app.router, request(Method::GET, "/dashboard", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "auth.unauthenticated");
}

#[tokio::test]
async fn sections_are_guarded_by_role() {
    let app = app();
    let (status, json) = send(
        &app.router,
        request(
            Method::GET,
            "/dashboard/admin",
            Some(("client-1", "client")),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "auth.forbidden");

    let (status, _) = send(
        &app.router,
        request(Method::GET, "/dashboard/therapist", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        request(
            Method::POST,
            "/admin/therapists/t1/decision",
            Some(THERAPIST),
            Some(json!({ "decision": "approve" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn client_dashboard_lists_saved_therapists() {
    let app = app();
    let (status, json) = send(
        &app.router,
        request(
            Method::GET,
            "/dashboard/client",
            Some(("client-1", "client")),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["favorites"][0]["name"], "Zeina");
    assert!(json["favorites"][0].get("adminNotes").is_none());
}

#[tokio::test]
async fn approved_profile_becomes_discoverable() {
    let app = app();

    let (status, json) = send(
        &app.router,
        request(Method::GET, "/dashboard/therapist", Some(THERAPIST), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accountStatus"], "draft");

    let (status, _) = send(
        &app.router,
        request(
            Method::PUT,
            "/dashboard/therapist/profile",
            Some(THERAPIST),
            Some(json!({ "name": "Amal", "specializations": ["Anxiety Counseling"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Approving a draft is not a valid move.
    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            "/admin/therapists/t1/decision",
            Some(ADMIN),
            Some(json!({ "decision": "approve" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "lifecycle.invalid_transition");

    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            "/dashboard/therapist/submit",
            Some(THERAPIST),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accountStatus"], "pending_approval");

    let (status, json) = send(
        &app.router,
        request(Method::GET, "/dashboard/admin", Some(ADMIN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pendingTherapists"][0]["id"], "t1");

    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            "/admin/therapists/t1/decision",
            Some(ADMIN),
            Some(json!({ "decision": "approve", "note": "Welcome aboard" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accountStatus"], "live");

    let (status, json) = send(
        &app.router,
        request(Method::GET, "/find/therapists?view=grid", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amal", "Zeina"]);
}

#[tokio::test]
async fn unknown_moderation_decision_is_rejected() {
    let app = app();
    let (status, _) = send(
        &app.router,
        request(
            Method::POST,
            "/admin/therapists/t1/decision",
            Some(ADMIN),
            Some(json!({ "decision": "maybe" })),
        ),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn uploads_are_validated_before_storage() {
    let app = app();

    let (status, json) = send(
        &app.router,
        upload("profile_picture", THERAPIST, "image/png", 2048),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let url = json["url"].as_str().unwrap();
    assert!(app.storage.contains_url(url));
    assert!(json["path"].as_str().unwrap().starts_with("t1/profile_pictures/"));

    let (status, json) = send(
        &app.router,
        upload("profile_picture", THERAPIST, "text/plain", 16),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "upload.rejected");

    // Over the configured 1 MiB image limit.
    let (status, json) = send(
        &app.router,
        upload("profile_picture", THERAPIST, "image/png", 1024 * 1024 + 1),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "upload.rejected");

    let (status, json) = send(&app.router, upload("avatar", THERAPIST, "image/png", 16)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"][0]["field"], "kind");

    let (status, _) = send(
        &app.router,
        upload("clinic_photo", THERAPIST, "image/png", 16),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.storage.upload_count(), 1);
}

#[tokio::test]
async fn inquiry_round_trip() {
    let app = app();
    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            "/inquiries",
            None,
            Some(json!({
                "email": "visitor@example.com",
                "subject": "Listing question",
                "message": "Can clinics rent by the day?"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "open");
    let id = json["id"].as_str().unwrap().to_owned();

    let (status, json) = send(
        &app.router,
        request(Method::GET, "/admin/inquiries?status=open", Some(ADMIN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app.router,
        request(Method::GET, "/admin/inquiries?status=lost", Some(ADMIN), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let status_uri = format!("/admin/inquiries/{id}/status");
    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            &status_uri,
            Some(ADMIN),
            Some(json!({ "status": "closed", "reply": "Yes, daily rates are supported." })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["adminReply"], "Yes, daily rates are supported.");

    let (status, json) = send(
        &app.router,
        request(
            Method::POST,
            &status_uri,
            Some(ADMIN),
            Some(json!({ "status": "escalated" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "lifecycle.invalid_transition");
}

#[tokio::test]
async fn locale_tables_fall_back_to_english() {
    let app = app();
    let (status, json) = send(&app.router, request(Method::GET, "/locales/ar", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lang"], "ar");
    assert_eq!(json["strings"]["nav.home"], "الرئيسية");
    assert_eq!(json["strings"]["nav.find"], "Find a therapist");

    let (_, json) = send(&app.router, request(Method::GET, "/locales", None, None)).await;
    assert_eq!(json["lang"], "en");
    assert_eq!(json["strings"]["nav.home"], "Home");
}
