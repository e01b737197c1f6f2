//! Marketplace module wiring.

use std::sync::Arc;

use axum::Router;
use discovery_sdk::DiscoveryClientV1;
use marketplace_sdk::MarketplaceClientV1;
use tracing::info;

use crate::api::rest::routes;
use crate::config::MarketplaceConfig;
use crate::domain::locale::LocaleCatalog;
use crate::domain::service::{Ports, Service};
use crate::local_client::MarketplaceLocalClient;

/// Listings, moderation, uploads and inquiries. Reads saved therapists through
/// the discovery client.
pub struct MarketplaceModule {
    service: Arc<Service>,
    locales: Arc<LocaleCatalog>,
    max_upload_bytes: usize,
}

impl MarketplaceModule {
    pub fn new(
        cfg: &MarketplaceConfig,
        ports: Ports,
        discovery: Arc<dyn DiscoveryClientV1>,
    ) -> Self {
        info!(
            max_image_mb = cfg.max_image_mb,
            max_video_mb = cfg.max_video_mb,
            max_document_mb = cfg.max_document_mb,
            "initializing marketplace module"
        );
        let locales = cfg
            .locales_dir
            .as_deref()
            .map(LocaleCatalog::load_dir)
            .unwrap_or_default()
            .with_default_locale(&cfg.default_locale);
        Self::with_locales(cfg, ports, discovery, locales)
    }

    /// Like [`MarketplaceModule::new`] with an already built locale catalog.
    pub fn with_locales(
        cfg: &MarketplaceConfig,
        ports: Ports,
        discovery: Arc<dyn DiscoveryClientV1>,
        locales: LocaleCatalog,
    ) -> Self {
        Self {
            service: Arc::new(Service::new(ports, discovery, cfg)),
            locales: Arc::new(locales),
            max_upload_bytes: usize::try_from(cfg.max_upload_bytes()).unwrap_or(usize::MAX),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn locales(&self) -> Arc<LocaleCatalog> {
        Arc::clone(&self.locales)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn MarketplaceClientV1> {
        Arc::new(MarketplaceLocalClient::new(self.service()))
    }

    pub fn router(&self) -> Router {
        info!("registering marketplace REST routes");
        routes::router(self.service(), self.locales(), self.max_upload_bytes)
    }
}
