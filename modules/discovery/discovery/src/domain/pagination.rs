//! Accumulating cursor pagination for one active filter set.
//!
//! Every reset bumps a generation counter. Each [`PageRequest`] carries the
//! generation it was issued under, and a result whose generation no longer
//! matches is dropped instead of being appended to the newer list.

use std::collections::HashSet;

use discovery_sdk::{Cursor, Page, Therapist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

/// Intent to fetch a page; hand it back to [`PaginationController::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub kind: FetchKind,
    pub cursor: Option<Cursor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Applied { added: usize },
    Failed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    accumulated: Vec<Therapist>,
    seen: HashSet<String>,
    cursor: Option<Cursor>,
    is_loading: bool,
    exhausted: bool,
    generation: u64,
    error: Option<String>,
    lookahead_threshold: usize,
}

impl PaginationController {
    #[must_use]
    pub fn new(lookahead_threshold: usize) -> Self {
        Self {
            accumulated: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            is_loading: false,
            exhausted: false,
            generation: 0,
            error: None,
            lookahead_threshold,
        }
    }

    #[must_use]
    pub fn accumulated(&self) -> &[Therapist] {
        &self.accumulated
    }

    #[must_use]
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Page-level error from the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        if !self.seen.contains(id) {
            return None;
        }
        self.accumulated.iter().position(|t| t.id == id)
    }

    /// Filter change: drop everything and request page one.
    pub fn reset(&mut self) -> PageRequest {
        self.generation += 1;
        self.accumulated.clear();
        self.seen.clear();
        self.cursor = None;
        self.exhausted = false;
        self.error = None;
        self.is_loading = true;
        PageRequest {
            generation: self.generation,
            kind: FetchKind::Initial,
            cursor: None,
        }
    }

    /// Whether a spotlight index this close to the end should trigger look-ahead.
    #[must_use]
    pub fn should_fetch_more(&self, current_index: usize) -> bool {
        !self.is_loading
            && !self.exhausted
            && self.error.is_none()
            && self.cursor.is_some()
            && current_index + self.lookahead_threshold >= self.accumulated.len()
    }

    /// Start a continuation fetch, or `None` while loading or once exhausted.
    pub fn begin_fetch_more(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.exhausted {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.is_loading = true;
        Some(PageRequest {
            generation: self.generation,
            kind: FetchKind::More,
            cursor: Some(cursor),
        })
    }

    /// Merge a fetched page. Ids already present are skipped; page order is kept.
    pub fn apply(
        &mut self,
        request: &PageRequest,
        result: Result<Page<Therapist>, String>,
    ) -> MergeOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                current = self.generation,
                "discarding page from a previous filter set"
            );
            return MergeOutcome::Stale;
        }
        self.is_loading = false;

        let page = match result {
            Ok(page) => page,
            Err(message) => {
                self.error = Some(message);
                return MergeOutcome::Failed;
            }
        };

        self.error = None;
        if page.is_last {
            self.exhausted = true;
        }
        if page.next_cursor.is_some() {
            self.cursor = page.next_cursor;
        }

        let before = self.accumulated.len();
        for therapist in page.items {
            if self.seen.insert(therapist.id.clone()) {
                self.accumulated.push(therapist);
            }
        }
        MergeOutcome::Applied {
            added: self.accumulated.len() - before,
        }
    }

    /// Put a deep-linked record at the front unless it is already loaded.
    /// Returns its index and whether it was inserted.
    pub fn prepend(&mut self, therapist: Therapist) -> (usize, bool) {
        if let Some(index) = self.position(&therapist.id) {
            return (index, false);
        }
        self.seen.insert(therapist.id.clone());
        self.accumulated.insert(0, therapist);
        (0, true)
    }
}
