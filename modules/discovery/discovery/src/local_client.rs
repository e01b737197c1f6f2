//! Local client adapter implementing the SDK API trait.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use discovery_sdk::{
    Cursor, DiscoveryClientV1, DiscoveryError, Filters, Page, Therapist, ViewMode,
};
use tw_security::SecurityContext;

use crate::domain::service::Service;

/// In-process `DiscoveryClientV1` backed by the domain service.
pub struct DiscoveryLocalClient {
    service: Arc<Service>,
}

impl DiscoveryLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DiscoveryClientV1 for DiscoveryLocalClient {
    async fn search(
        &self,
        ctx: &SecurityContext,
        filters: &Filters,
        mode: ViewMode,
        cursor: Option<Cursor>,
    ) -> Result<Page<Therapist>, DiscoveryError> {
        self.service
            .search(ctx, filters, mode, cursor)
            .await
            .map_err(Into::into)
    }

    async fn get_live_therapist(
        &self,
        _ctx: &SecurityContext,
        id: &str,
    ) -> Result<Therapist, DiscoveryError> {
        self.service.get_live_therapist(id).await.map_err(Into::into)
    }

    async fn list_favorites(
        &self,
        ctx: &SecurityContext,
    ) -> Result<BTreeSet<String>, DiscoveryError> {
        self.service.list_favorites(ctx).await.map_err(Into::into)
    }

    async fn set_favorite(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        favorited: bool,
    ) -> Result<(), DiscoveryError> {
        self.service
            .set_favorite(ctx, therapist_id, favorited)
            .await
            .map_err(Into::into)
    }
}
