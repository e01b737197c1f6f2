//! REST route registration for discovery.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::Service;

/// Discovery routes with the service attached as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/find/therapists", get(handlers::search))
        .route("/find/therapist/{id}", get(handlers::deep_link))
        .route("/find/favorites", get(handlers::list_favorites))
        .route(
            "/find/favorites/{id}",
            put(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        .route("/find/sessions", post(handlers::open_session))
        .route(
            "/find/sessions/{sid}",
            get(handlers::get_session).delete(handlers::close_session),
        )
        .route("/find/sessions/{sid}/filters", put(handlers::apply_filters))
        .route("/find/sessions/{sid}/mode", put(handlers::set_mode))
        .route("/find/sessions/{sid}/grid-page", put(handlers::set_grid_page))
        .route("/find/sessions/{sid}/navigate", post(handlers::navigate))
        .route("/find/sessions/{sid}/more", post(handlers::load_more))
        .route(
            "/find/sessions/{sid}/therapist/{id}",
            get(handlers::session_deep_link),
        )
        .route(
            "/find/sessions/{sid}/favorites/{id}/toggle",
            post(handlers::toggle_favorite),
        )
        .layer(Extension(service))
}
