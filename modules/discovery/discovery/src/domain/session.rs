//! Per-visitor discovery state and the registry that holds it.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use discovery_sdk::{Filters, Page, Therapist, ViewMode};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;
use tw_security::SecurityContext;
use uuid::Uuid;

use crate::config::DiscoveryConfig;
use crate::domain::error::DomainError;
use crate::domain::favorites::FavoritesSynchronizer;
use crate::domain::pagination::{MergeOutcome, PageRequest, PaginationController};
use crate::domain::presenter::{
    MapMarker, MapViewport, SlideDirection, ViewModePresenter, map_markers,
};

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Loading,
    /// Page-level load failure; distinct from an empty result.
    Error,
    Empty,
    Ready,
}

/// Snapshot rendered for the current view mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub error: Option<String>,
    pub filters: Filters,
    pub mode: ViewMode,
    pub total_loaded: usize,
    pub exhausted: bool,
    pub current_index: usize,
    /// Exit direction of the last spotlight move, for the card animation.
    pub last_direction: Option<SlideDirection>,
    pub grid_page: usize,
    pub total_grid_pages: usize,
    /// Spotlight: the focused card. Grid: the current page. Map: empty.
    pub items: Vec<Therapist>,
    pub markers: Vec<MapMarker>,
    pub viewport: Option<MapViewport>,
    pub favorites: BTreeSet<String>,
    pub flash: Option<String>,
}

#[derive(Debug)]
pub struct DiscoverySession {
    owner: Option<String>,
    filters: Filters,
    pagination: PaginationController,
    presenter: ViewModePresenter,
    favorites: FavoritesSynchronizer,
    flash: Option<String>,
}

impl DiscoverySession {
    #[must_use]
    pub fn new(
        ctx: &SecurityContext,
        mode: ViewMode,
        favorites: BTreeSet<String>,
        cfg: &DiscoveryConfig,
    ) -> Self {
        Self {
            owner: ctx.subject_id().map(str::to_owned),
            filters: Filters::default(),
            pagination: PaginationController::new(cfg.lookahead_threshold),
            presenter: ViewModePresenter::new(mode, cfg.grid_items_per_page),
            favorites: FavoritesSynchronizer::new(favorites),
            flash: None,
        }
    }

    /// A session is bound to the subject that opened it; anonymous sessions stay anonymous.
    pub fn authorize(&self, ctx: &SecurityContext) -> Result<(), DomainError> {
        if self.owner.as_deref() == ctx.subject_id() {
            Ok(())
        } else {
            Err(DomainError::SessionForbidden)
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.owner.is_some()
    }

    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.presenter.mode()
    }

    #[must_use]
    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    #[must_use]
    pub fn presenter(&self) -> &ViewModePresenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut ViewModePresenter {
        &mut self.presenter
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesSynchronizer {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesSynchronizer {
        &mut self.favorites
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
    }

    /// Replace the filter set and start over from page one.
    pub fn begin_filters(&mut self, filters: Filters) -> PageRequest {
        self.filters = filters;
        self.presenter.reset();
        self.pagination.reset()
    }

    /// Re-run the current filter set from page one.
    pub fn begin_refresh(&mut self) -> PageRequest {
        let filters = self.filters.clone();
        self.begin_filters(filters)
    }

    /// Spotlight look-ahead check; `None` when no fetch is due.
    pub fn begin_lookahead(&mut self) -> Option<PageRequest> {
        if self.presenter.mode() != ViewMode::Spotlight
            || !self.pagination.should_fetch_more(self.presenter.current_index())
        {
            return None;
        }
        self.pagination.begin_fetch_more()
    }

    pub fn begin_fetch_more(&mut self) -> Option<PageRequest> {
        self.pagination.begin_fetch_more()
    }

    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<Page<Therapist>, String>,
    ) -> MergeOutcome {
        let outcome = self.pagination.apply(request, result);
        if matches!(outcome, MergeOutcome::Applied { .. }) {
            self.presenter.on_list_changed(self.pagination.accumulated());
        }
        outcome
    }

    /// Prepend a deep-linked therapist and focus it in spotlight mode.
    pub fn focus_therapist(&mut self, therapist: Therapist) -> (usize, bool) {
        let (index, inserted) = self.pagination.prepend(therapist);
        if inserted {
            self.presenter.on_list_changed(self.pagination.accumulated());
        }
        self.presenter.set_mode(ViewMode::Spotlight);
        self.presenter.focus(index);
        (index, inserted)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let empty = self.pagination.accumulated().is_empty();
        if !empty {
            SessionStatus::Ready
        } else if self.pagination.is_loading() {
            SessionStatus::Loading
        } else if self.pagination.error().is_some() {
            SessionStatus::Error
        } else {
            SessionStatus::Empty
        }
    }

    /// Render the current state. The flash message is shown once.
    pub fn view(&mut self, session_id: SessionId) -> SessionView {
        let list = self.pagination.accumulated();
        let presenter = &self.presenter;
        let items = match presenter.mode() {
            ViewMode::Spotlight => presenter.spotlight_item(list).cloned().into_iter().collect(),
            ViewMode::Grid => presenter.grid_items(list).to_vec(),
            ViewMode::Map => Vec::new(),
        };
        let markers = if presenter.mode() == ViewMode::Map {
            map_markers(list)
        } else {
            Vec::new()
        };
        SessionView {
            session_id,
            status: self.status(),
            error: self.pagination.error().map(str::to_owned),
            filters: self.filters.clone(),
            mode: presenter.mode(),
            total_loaded: list.len(),
            exhausted: self.pagination.is_exhausted(),
            current_index: presenter.current_index(),
            last_direction: presenter.last_direction(),
            grid_page: presenter.grid_page(),
            total_grid_pages: presenter.total_grid_pages(list.len()),
            items,
            markers,
            viewport: presenter.viewport(),
            favorites: self.favorites.favorites().clone(),
            flash: self.flash.take(),
        }
    }
}

pub type SharedSession = Arc<Mutex<DiscoverySession>>;

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct SessionEntry {
    session: SharedSession,
    last_access: Mutex<Instant>,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(*self.last_access.lock()) > ttl
    }
}

/// Live discovery sessions keyed by id. Sessions idle for longer than the
/// TTL are dropped on the next insert or lookup.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
        }
    }

    pub fn insert(&self, session: DiscoverySession) -> (SessionId, SharedSession) {
        self.evict_idle();
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            SessionEntry {
                session: Arc::clone(&shared),
                last_access: Mutex::new(Instant::now()),
            },
        );
        (id, shared)
    }

    /// Look up a session and check it belongs to the caller.
    pub fn get(&self, ctx: &SecurityContext, id: SessionId) -> Result<SharedSession, DomainError> {
        let now = Instant::now();
        if self
            .sessions
            .remove_if(&id, |_, entry| entry.is_idle(now, self.idle_ttl))
            .is_some()
        {
            debug!(session_id = %id, "discovery session expired");
        }
        let shared = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(&entry.session))
            .ok_or_else(|| DomainError::session_not_found(id.to_string()))?;
        shared.lock().authorize(ctx)?;
        if let Some(entry) = self.sessions.get(&id) {
            *entry.last_access.lock() = now;
        }
        Ok(shared)
    }

    pub fn remove(&self, ctx: &SecurityContext, id: SessionId) -> Result<(), DomainError> {
        self.get(ctx, id)?;
        self.sessions.remove(&id);
        Ok(())
    }

    /// Drop every session idle for longer than the TTL.
    pub fn evict_idle(&self) {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| !entry.is_idle(now, self.idle_ttl));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.sessions.len(), "evicted idle discovery sessions");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
