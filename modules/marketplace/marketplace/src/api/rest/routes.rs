//! REST route registration for the marketplace.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Router, middleware};

use super::{guard, handlers};
use crate::domain::locale::LocaleCatalog;
use crate::domain::service::Service;

/// Marketplace routes. `/dashboard/{section}` and `/admin` paths pass the role guard first.
pub fn router(service: Arc<Service>, locales: Arc<LocaleCatalog>, max_upload_bytes: usize) -> Router {
    let uploads = Router::new()
        .route("/uploads/{kind}", post(handlers::upload_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/dashboard", get(handlers::dashboard_home))
        .route("/dashboard/client", get(handlers::client_dashboard))
        .route("/dashboard/therapist", get(handlers::therapist_dashboard))
        .route(
            "/dashboard/therapist/profile",
            put(handlers::update_therapist_profile),
        )
        .route(
            "/dashboard/therapist/submit",
            post(handlers::submit_therapist_profile),
        )
        .route(
            "/dashboard/therapist/certifications",
            post(handlers::add_certification),
        )
        .route(
            "/dashboard/therapist/certifications/{id}",
            delete(handlers::remove_certification),
        )
        .route("/dashboard/clinic", get(handlers::clinic_dashboard))
        .route("/dashboard/clinic/profile", put(handlers::update_clinic))
        .route("/dashboard/clinic/submit", post(handlers::submit_clinic))
        .route(
            "/dashboard/clinic/listings",
            post(handlers::add_space_listing),
        )
        .route(
            "/dashboard/clinic/listings/{id}",
            delete(handlers::remove_space_listing),
        )
        .route("/dashboard/admin", get(handlers::admin_dashboard))
        .route(
            "/admin/therapists/{id}/decision",
            post(handlers::moderate_therapist),
        )
        .route(
            "/admin/therapists/{id}/certifications/{cert_id}/verify",
            post(handlers::verify_certification),
        )
        .route("/admin/clinics/{id}/decision", post(handlers::moderate_clinic))
        .route("/admin/inquiries", get(handlers::list_inquiries))
        .route(
            "/admin/inquiries/{id}/status",
            post(handlers::update_inquiry_status),
        )
        .route_layer(middleware::from_fn(guard::require_section))
        .route("/inquiries", post(handlers::create_inquiry))
        .route("/locales", get(handlers::default_locale_table))
        .route("/locales/{lang}", get(handlers::locale_table))
        .merge(uploads)
        .layer(Extension(service))
        .layer(Extension(locales))
}
