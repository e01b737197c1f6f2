//! `DiscoveryClientV1` trait definition.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tw_security::SecurityContext;

use crate::errors::DiscoveryError;
use crate::filters::{Filters, ViewMode};
use crate::models::Therapist;
use crate::page::{Cursor, Page};

/// Public API of the discovery module, consumed by other modules and the server.
#[async_trait]
pub trait DiscoveryClientV1: Send + Sync {
    /// Fetch one refined page of live therapists.
    async fn search(
        &self,
        ctx: &SecurityContext,
        filters: &Filters,
        mode: ViewMode,
        cursor: Option<Cursor>,
    ) -> Result<Page<Therapist>, DiscoveryError>;

    /// Fetch a single therapist for a deep link. Non-live records are `NotLive`.
    async fn get_live_therapist(
        &self,
        ctx: &SecurityContext,
        id: &str,
    ) -> Result<Therapist, DiscoveryError>;

    /// Therapist ids favorited by the caller.
    async fn list_favorites(
        &self,
        ctx: &SecurityContext,
    ) -> Result<BTreeSet<String>, DiscoveryError>;

    /// Add or remove a favorite for the caller.
    async fn set_favorite(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        favorited: bool,
    ) -> Result<(), DiscoveryError>;
}
