//! Discovery module wiring.

use std::sync::Arc;

use axum::Router;
use discovery_sdk::DiscoveryClientV1;
use tracing::info;

use crate::api::rest::routes;
use crate::config::DiscoveryConfig;
use crate::domain::ports::{FavoritesStore, TherapistStore};
use crate::domain::service::Service;
use crate::local_client::DiscoveryLocalClient;

/// Therapist discovery: owns the domain service and exposes its client and routes.
pub struct DiscoveryModule {
    service: Arc<Service>,
}

impl DiscoveryModule {
    pub fn new(
        cfg: DiscoveryConfig,
        therapists: Arc<dyn TherapistStore>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Self {
        info!(
            spotlight_page_size = cfg.spotlight_page_size,
            grid_page_size = cfg.grid_page_size,
            "initializing discovery module"
        );
        Self {
            service: Arc::new(Service::new(therapists, favorites, cfg)),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn DiscoveryClientV1> {
        Arc::new(DiscoveryLocalClient::new(self.service()))
    }

    pub fn router(&self) -> Router {
        info!("registering discovery REST routes");
        routes::router(self.service())
    }
}
