//! Domain service for therapist discovery.
//!
//! Stateless operations (`search`, `get_live_therapist`, favorites) back the
//! public client. Session operations drive one visitor's accumulated list:
//! every store call happens with the session lock released, and results are
//! applied under the lock with stale generations dropped.

use std::collections::BTreeSet;
use std::sync::Arc;

use discovery_sdk::{Cursor, DiscoveryError, Filters, Page, Therapist, ViewMode};
use serde::Serialize;
use tracing::instrument;
use tw_security::SecurityContext;

use crate::config::DiscoveryConfig;
use crate::domain::error::DomainError;
use crate::domain::favorites::{self, ToggleOutcome, ToggleState};
use crate::domain::pagination::PageRequest;
use crate::domain::ports::{FavoritesStore, TherapistStore};
use crate::domain::presenter::NavKey;
use crate::domain::query::translate;
use crate::domain::refine::refine;
use crate::domain::session::{
    DiscoverySession, SessionId, SessionRegistry, SessionView, SharedSession,
};

/// Where the discovery page sends a visitor after a failed deep link.
pub const FIND_PATH: &str = "/find";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeepLinkOutcome {
    Focused { index: usize, inserted: bool },
    Redirect { to: String, message: String },
}

impl DeepLinkOutcome {
    fn redirect(message: impl Into<String>) -> Self {
        Self::Redirect {
            to: FIND_PATH.to_owned(),
            message: message.into(),
        }
    }
}

pub struct Service {
    therapists: Arc<dyn TherapistStore>,
    favorites: Arc<dyn FavoritesStore>,
    sessions: SessionRegistry,
    config: DiscoveryConfig,
}

impl Service {
    pub fn new(
        therapists: Arc<dyn TherapistStore>,
        favorites: Arc<dyn FavoritesStore>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            therapists,
            favorites,
            sessions: SessionRegistry::with_idle_ttl(config.session_idle_ttl()),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    // === Stateless operations ===

    /// Query the store and refine the page for `ctx`.
    #[instrument(skip(self, ctx, filters), fields(mode = %mode))]
    pub async fn search(
        &self,
        ctx: &SecurityContext,
        filters: &Filters,
        mode: ViewMode,
        cursor: Option<Cursor>,
    ) -> Result<Page<Therapist>, DomainError> {
        let favorites = if filters.show_only_liked && ctx.is_authenticated() {
            Some(self.list_favorites(ctx).await?)
        } else {
            None
        };
        self.fetch_page(filters, mode, cursor, favorites.as_ref())
            .await
    }

    async fn fetch_page(
        &self,
        filters: &Filters,
        mode: ViewMode,
        cursor: Option<Cursor>,
        favorites: Option<&BTreeSet<String>>,
    ) -> Result<Page<Therapist>, DomainError> {
        let query = translate(filters, mode, &self.config, cursor);
        let raw = self.therapists.query(&query).await.map_err(|e| {
            tracing::error!(error = %e, "therapist query failed");
            DomainError::from(e)
        })?;

        let fetched = raw.items.len();
        let items = refine(raw.items, filters, favorites);
        tracing::debug!(fetched, kept = items.len(), "fetched discovery page");
        Ok(Page {
            items,
            next_cursor: raw.next_cursor,
            fetched,
            is_last: fetched < query.limit,
        })
    }

    /// Single-record fetch for deep links; only live records are visible.
    pub async fn get_live_therapist(&self, id: &str) -> Result<Therapist, DomainError> {
        let therapist = self
            .therapists
            .get(id)
            .await?
            .ok_or_else(|| DomainError::therapist_not_found(id))?;
        if !therapist.account_status.is_live() {
            return Err(DomainError::therapist_not_live(id));
        }
        Ok(therapist)
    }

    pub async fn list_favorites(
        &self,
        ctx: &SecurityContext,
    ) -> Result<BTreeSet<String>, DomainError> {
        let user = ctx.subject_id().ok_or(DomainError::AuthRequired)?;
        Ok(self.favorites.list(user).await?)
    }

    pub async fn set_favorite(
        &self,
        ctx: &SecurityContext,
        therapist_id: &str,
        favorited: bool,
    ) -> Result<(), DomainError> {
        let user = ctx.subject_id().ok_or(DomainError::AuthRequired)?;
        if therapist_id.trim().is_empty() {
            return Err(DomainError::validation("therapistId", "must not be empty"));
        }
        if favorited {
            self.favorites.add(user, therapist_id).await?;
        } else {
            self.favorites.remove(user, therapist_id).await?;
        }
        tracing::info!(user, therapist_id, favorited, "favorite updated");
        Ok(())
    }

    // === Session operations ===

    /// Open a session and run the initial query.
    #[instrument(skip(self, ctx, filters), fields(mode = %mode))]
    pub async fn open_session(
        &self,
        ctx: &SecurityContext,
        filters: Filters,
        mode: ViewMode,
    ) -> Result<SessionView, DomainError> {
        let favorites = match ctx.subject_id() {
            Some(user) => self.favorites.list(user).await.unwrap_or_else(|e| {
                tracing::warn!(user, error = %e, "could not load favorites; starting empty");
                BTreeSet::new()
            }),
            None => BTreeSet::new(),
        };
        let session = DiscoverySession::new(ctx, mode, favorites, &self.config);
        let (id, shared) = self.sessions.insert(session);
        tracing::info!(session_id = %id, "discovery session opened");

        let request = shared.lock().begin_filters(filters);
        self.run_request(&shared, request).await;
        let view = shared.lock().view(id);
        Ok(view)
    }

    pub fn session_view(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let view = shared.lock().view(id);
        Ok(view)
    }

    pub fn close_session(&self, ctx: &SecurityContext, id: SessionId) -> Result<(), DomainError> {
        self.sessions.remove(ctx, id)
    }

    /// Replace the filter set; accumulation restarts from page one.
    #[instrument(skip(self, ctx, filters), fields(session_id = %id))]
    pub async fn apply_filters(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        filters: Filters,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let request = shared.lock().begin_filters(filters);
        self.run_request(&shared, request).await;
        let view = shared.lock().view(id);
        Ok(view)
    }

    /// Switch presentation. Never refetches.
    pub fn set_mode(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        mode: ViewMode,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let mut session = shared.lock();
        session.presenter_mut().set_mode(mode);
        Ok(session.view(id))
    }

    pub fn set_grid_page(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        page: usize,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let mut session = shared.lock();
        let len = session.pagination().accumulated().len();
        session.presenter_mut().set_grid_page(page, len);
        Ok(session.view(id))
    }

    /// Spotlight keyboard navigation, followed by look-ahead when near the end.
    pub async fn navigate(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        key: NavKey,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        shared.lock().presenter_mut().handle_key(key);
        self.load_more_if_needed(&shared).await;
        let view = shared.lock().view(id);
        Ok(view)
    }

    /// Explicit "load more" (grid and map); a no-op while loading or once exhausted.
    pub async fn load_more(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
    ) -> Result<SessionView, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let request = shared.lock().begin_fetch_more();
        if let Some(request) = request {
            self.run_request(&shared, request).await;
        }
        let view = shared.lock().view(id);
        Ok(view)
    }

    async fn load_more_if_needed(&self, shared: &SharedSession) {
        let request = shared.lock().begin_lookahead();
        if let Some(request) = request {
            self.run_request(shared, request).await;
        }
    }

    /// Resolve `/find/therapist/{id}` against a session.
    ///
    /// Missing or non-live records leave the list untouched and redirect.
    #[instrument(skip(self, ctx), fields(session_id = %id))]
    pub async fn open_deep_link(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        therapist_id: &str,
    ) -> Result<DeepLinkOutcome, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let outcome = match self.get_live_therapist(therapist_id).await {
            Ok(therapist) => {
                let (index, inserted) = shared.lock().focus_therapist(therapist);
                DeepLinkOutcome::Focused { index, inserted }
            }
            Err(e) => {
                let Some(message) = deep_link_redirect_message(&e) else {
                    return Err(e);
                };
                tracing::info!(therapist_id, error = %e, "deep link redirected");
                shared.lock().set_flash(message);
                DeepLinkOutcome::redirect(message)
            }
        };
        self.load_more_if_needed(&shared).await;
        Ok(outcome)
    }

    /// Optimistic favorite toggle.
    ///
    /// With the liked-only filter active a committed toggle re-runs the filter
    /// set so the list reflects the new favorite membership.
    #[instrument(skip(self, ctx), fields(session_id = %id))]
    pub async fn toggle_favorite(
        &self,
        ctx: &SecurityContext,
        id: SessionId,
        therapist_id: &str,
    ) -> Result<ToggleOutcome, DomainError> {
        let shared = self.sessions.get(ctx, id)?;
        let Some(intent) = shared.lock().favorites_mut().begin_toggle(ctx, therapist_id) else {
            tracing::debug!(therapist_id, "favorite toggle needs sign-in");
            return Ok(ToggleOutcome::AuthRequired);
        };

        let result = favorites::persist(self.favorites.as_ref(), &intent).await;
        let (state, liked_only) = {
            let mut session = shared.lock();
            let state = session.favorites_mut().finish(&intent, &result);
            (state, session.filters().show_only_liked)
        };

        match (state, result) {
            (ToggleState::RolledBack, Err(e)) => Ok(ToggleOutcome::RolledBack {
                therapist_id: intent.therapist_id,
                error: DomainError::from(e).to_string(),
            }),
            _ => {
                if liked_only {
                    let request = shared.lock().begin_refresh();
                    self.run_request(&shared, request).await;
                }
                Ok(ToggleOutcome::Committed {
                    therapist_id: intent.therapist_id,
                    favorited: intent.favorited,
                    refilter_required: liked_only,
                })
            }
        }
    }

    /// Fetch for `request` outside the lock, then merge under it.
    async fn run_request(&self, shared: &SharedSession, request: PageRequest) {
        let (filters, mode, favorites) = {
            let session = shared.lock();
            let favorites = session
                .filters()
                .show_only_liked
                .then(|| session.favorites().favorites().clone())
                .filter(|_| session.is_authenticated());
            (session.filters().clone(), session.mode(), favorites)
        };

        let result = self
            .fetch_page(&filters, mode, request.cursor.clone(), favorites.as_ref())
            .await
            .map_err(|e| DiscoveryError::from(e).to_string());
        shared.lock().apply_page(&request, result);
    }
}

/// Message shown on `/find` when a deep link cannot be opened. Other errors
/// (store failures) are not redirects.
#[must_use]
pub fn deep_link_redirect_message(e: &DomainError) -> Option<&'static str> {
    match e {
        DomainError::TherapistNotFound { .. } => Some("Therapist not found"),
        DomainError::TherapistNotLive { .. } => {
            Some("This therapist profile is not live at the moment")
        }
        _ => None,
    }
}
