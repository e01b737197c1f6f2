//! Module wiring and the HTTP listener.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderName, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use discovery::DiscoveryModule;
use discovery::infra::storage::{InMemoryFavoritesStore, InMemoryTherapistStore};
use marketplace::MarketplaceModule;
use marketplace::api::rest::handlers::FILE_NAME_HEADER;
use marketplace::domain::service::Ports;
use marketplace::infra::storage::{
    InMemoryActivityLog, InMemoryClinicStore, InMemoryInquiryStore, InMemoryObjectStorage,
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tw_security::extract::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_ROLES_HEADER};

use crate::config::AppConfig;
use crate::{seed, signals};

/// Build both modules over shared in-memory stores and merge their routes.
///
/// The therapist store is shared: marketplace writes profiles, discovery reads
/// the live ones.
pub fn build_router(cfg: &AppConfig) -> Router {
    let (therapists, clinics) = if cfg.server.seed_demo_data {
        info!("seeding demo listings");
        (
            InMemoryTherapistStore::with_therapists(seed::therapists()),
            InMemoryClinicStore::with_clinics(seed::clinics()),
        )
    } else {
        (InMemoryTherapistStore::new(), InMemoryClinicStore::new())
    };
    let therapists = Arc::new(therapists);

    let discovery = DiscoveryModule::new(
        cfg.discovery.clone(),
        therapists.clone(),
        Arc::new(InMemoryFavoritesStore::new()),
    );
    let ports = Ports {
        profiles: therapists,
        clinics: Arc::new(clinics),
        inquiries: Arc::new(InMemoryInquiryStore::new()),
        activity: Arc::new(InMemoryActivityLog::new()),
        storage: Arc::new(InMemoryObjectStorage::default()),
    };
    let marketplace = MarketplaceModule::new(&cfg.marketplace, ports, discovery.client());

    Router::new()
        .route("/health", get(health))
        .merge(discovery.router())
        .merge(marketplace.router())
        .layer(TraceLayer::new_for_http())
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(USER_EMAIL_HEADER),
            HeaderName::from_static(USER_ROLES_HEADER),
            HeaderName::from_static(FILE_NAME_HEADER),
        ])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn serve(cfg: &AppConfig) -> Result<()> {
    let addr = cfg.server.socket_addr()?;
    let router = build_router(cfg);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "TheraWay server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = signals::wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed, shutting down");
            }
        })
        .await
        .context("server error")?;

    info!("TheraWay server stopped");
    Ok(())
}
