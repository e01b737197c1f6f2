//! Optimistic favorites with rollback.
//!
//! A toggle is split in three steps so no lock is held across the remote call:
//! [`FavoritesSynchronizer::begin_toggle`] flips the local set and returns an
//! intent, the caller performs the remote write, and
//! [`FavoritesSynchronizer::finish`] commits or reverts the flip.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tw_security::SecurityContext;

use crate::domain::ports::{FavoritesStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleState {
    Pending,
    Committed,
    RolledBack,
}

/// Local flip awaiting remote confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleIntent {
    pub user_id: String,
    pub therapist_id: String,
    /// Membership after the optimistic flip.
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Anonymous caller: prompt sign-in, nothing changed, no remote call.
    AuthRequired,
    Committed {
        therapist_id: String,
        favorited: bool,
        refilter_required: bool,
    },
    RolledBack {
        therapist_id: String,
        error: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct FavoritesSynchronizer {
    favorites: BTreeSet<String>,
    states: HashMap<String, ToggleState>,
}

impl FavoritesSynchronizer {
    #[must_use]
    pub fn new(favorites: BTreeSet<String>) -> Self {
        Self {
            favorites,
            states: HashMap::new(),
        }
    }

    #[must_use]
    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    #[must_use]
    pub fn contains(&self, therapist_id: &str) -> bool {
        self.favorites.contains(therapist_id)
    }

    #[must_use]
    pub fn state(&self, therapist_id: &str) -> Option<ToggleState> {
        self.states.get(therapist_id).copied()
    }

    /// Flip membership locally. `None` for anonymous callers.
    pub fn begin_toggle(
        &mut self,
        ctx: &SecurityContext,
        therapist_id: &str,
    ) -> Option<ToggleIntent> {
        let user_id = ctx.subject_id()?;
        let favorited = if self.favorites.remove(therapist_id) {
            false
        } else {
            self.favorites.insert(therapist_id.to_owned());
            true
        };
        self.states
            .insert(therapist_id.to_owned(), ToggleState::Pending);
        Some(ToggleIntent {
            user_id: user_id.to_owned(),
            therapist_id: therapist_id.to_owned(),
            favorited,
        })
    }

    /// Reconcile with the remote result; a failure restores the pre-toggle membership.
    pub fn finish(&mut self, intent: &ToggleIntent, result: &Result<(), StoreError>) -> ToggleState {
        let state = match result {
            Ok(()) => ToggleState::Committed,
            Err(e) => {
                tracing::warn!(
                    therapist_id = %intent.therapist_id,
                    error = %e,
                    "favorite toggle failed, rolling back"
                );
                if intent.favorited {
                    self.favorites.remove(&intent.therapist_id);
                } else {
                    self.favorites.insert(intent.therapist_id.clone());
                }
                ToggleState::RolledBack
            }
        };
        self.states.insert(intent.therapist_id.clone(), state);
        state
    }
}

/// Issue the remote write for an intent.
pub async fn persist(store: &dyn FavoritesStore, intent: &ToggleIntent) -> Result<(), StoreError> {
    if intent.favorited {
        store.add(&intent.user_id, &intent.therapist_id).await
    } else {
        store.remove(&intent.user_id, &intent.therapist_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tw_security::Role;

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl FavoritesStore for RecordingStore {
        async fn list(&self, _user_id: &str) -> Result<BTreeSet<String>, StoreError> {
            Ok(BTreeSet::new())
        }

        async fn add(&self, _user_id: &str, therapist_id: &str) -> Result<(), StoreError> {
            self.calls.lock().push(format!("add:{therapist_id}"));
            if self.fail {
                return Err(StoreError::Unavailable("offline".to_owned()));
            }
            Ok(())
        }

        async fn remove(&self, _user_id: &str, therapist_id: &str) -> Result<(), StoreError> {
            self.calls.lock().push(format!("remove:{therapist_id}"));
            if self.fail {
                return Err(StoreError::Unavailable("offline".to_owned()));
            }
            Ok(())
        }
    }

    async fn toggle(
        sync: &mut FavoritesSynchronizer,
        store: &RecordingStore,
        ctx: &SecurityContext,
        id: &str,
    ) -> Option<ToggleState> {
        let intent = sync.begin_toggle(ctx, id)?;
        let result = persist(store, &intent).await;
        Some(sync.finish(&intent, &result))
    }

    #[tokio::test]
    async fn anonymous_toggles_make_no_remote_calls() {
        let store = RecordingStore::default();
        let mut sync = FavoritesSynchronizer::default();
        let ctx = SecurityContext::anonymous();

        assert_eq!(toggle(&mut sync, &store, &ctx, "t1").await, None);
        assert_eq!(toggle(&mut sync, &store, &ctx, "t1").await, None);
        assert!(store.calls.lock().is_empty());
        assert!(sync.favorites().is_empty());
    }

    #[tokio::test]
    async fn add_then_remove_commits_both() {
        let store = RecordingStore::default();
        let mut sync = FavoritesSynchronizer::default();
        let ctx = SecurityContext::user("u1", &[Role::Client]);

        assert_eq!(
            toggle(&mut sync, &store, &ctx, "t1").await,
            Some(ToggleState::Committed)
        );
        assert!(sync.contains("t1"));
        toggle(&mut sync, &store, &ctx, "t1").await;
        assert!(!sync.contains("t1"));
        assert_eq!(*store.calls.lock(), vec!["add:t1", "remove:t1"]);
    }

    #[tokio::test]
    async fn failed_toggle_restores_previous_membership() {
        let store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };
        let ctx = SecurityContext::user("u1", &[Role::Client]);

        let mut sync = FavoritesSynchronizer::new(["t2".to_owned()].into());
        let before = sync.favorites().clone();

        assert_eq!(
            toggle(&mut sync, &store, &ctx, "t1").await,
            Some(ToggleState::RolledBack)
        );
        assert_eq!(
            toggle(&mut sync, &store, &ctx, "t2").await,
            Some(ToggleState::RolledBack)
        );
        assert_eq!(sync.favorites(), &before);
        assert_eq!(sync.state("t2"), Some(ToggleState::RolledBack));
    }

    #[test]
    fn begin_toggle_marks_pending() {
        let mut sync = FavoritesSynchronizer::default();
        let ctx = SecurityContext::user("u1", &[Role::Client]);
        let intent = sync.begin_toggle(&ctx, "t1").unwrap();
        assert!(intent.favorited);
        assert!(sync.contains("t1"));
        assert_eq!(sync.state("t1"), Some(ToggleState::Pending));
    }
}
