//! In-memory document store and favorites collection.
//!
//! Used by tests and by the server when no managed store is configured. Both
//! can be switched into a failing state to exercise error paths.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use discovery_sdk::Therapist;
use parking_lot::{Mutex, RwLock};

use super::cursor::{self, NameKey};
use crate::domain::ports::{
    FavoritesStore, StorePage, StoreError, TherapistQuery, TherapistStore,
};

fn key_of(t: &Therapist) -> NameKey {
    NameKey {
        name: t.name.clone(),
        id: t.id.clone(),
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTherapistStore {
    records: RwLock<BTreeMap<String, Therapist>>,
    failure: Mutex<Option<String>>,
    queries: AtomicUsize,
}

impl InMemoryTherapistStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_therapists(items: impl IntoIterator<Item = Therapist>) -> Self {
        let store = Self::new();
        for t in items {
            store.upsert(t);
        }
        store
    }

    /// Insert or replace a record. Practice locations are normalized to a single primary.
    pub fn upsert(&self, mut therapist: Therapist) {
        therapist.normalize_primary_location();
        self.records.write().insert(therapist.id.clone(), therapist);
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<Therapist> {
        self.records.read().get(id).cloned()
    }

    /// All records regardless of status, ordered by id.
    #[must_use]
    pub fn all(&self) -> Vec<Therapist> {
        self.records.read().values().cloned().collect()
    }

    /// Make every following call fail with `message`; `None` restores normal operation.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_owned);
    }

    /// Number of `query` calls served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.lock().as_deref() {
            Some(message) => Err(StoreError::Unavailable(message.to_owned())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TherapistStore for InMemoryTherapistStore {
    async fn query(&self, query: &TherapistQuery) -> Result<StorePage, StoreError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.check()?;

        let after = query.start_after.as_ref().map(cursor::decode).transpose()?;

        let mut matching: Vec<Therapist> = self
            .records
            .read()
            .values()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        matching.sort_by_key(key_of);

        let items: Vec<Therapist> = matching
            .into_iter()
            .filter(|t| after.as_ref().is_none_or(|a| key_of(t) > *a))
            .take(query.limit)
            .collect();

        let next_cursor = items.last().map(|t| cursor::encode(&key_of(t))).transpose()?;
        Ok(StorePage { items, next_cursor })
    }

    async fn get(&self, id: &str) -> Result<Option<Therapist>, StoreError> {
        self.check()?;
        Ok(self.find(id))
    }
}

/// Per-user favorite sets with a count of remote writes.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    sets: DashMap<String, BTreeSet<String>>,
    failure: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl InMemoryFavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user_id: &str, therapist_ids: &[&str]) {
        self.sets
            .entry(user_id.to_owned())
            .or_default()
            .extend(therapist_ids.iter().map(|id| (*id).to_owned()));
    }

    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_owned);
    }

    /// Number of `add`/`remove` calls received, including failed ones.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn snapshot(&self, user_id: &str) -> BTreeSet<String> {
        self.sets
            .get(user_id)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.lock().as_deref() {
            Some(message) => Err(StoreError::Unavailable(message.to_owned())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FavoritesStore for InMemoryFavoritesStore {
    async fn list(&self, user_id: &str) -> Result<BTreeSet<String>, StoreError> {
        self.check()?;
        Ok(self.snapshot(user_id))
    }

    async fn add(&self, user_id: &str, therapist_id: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        self.sets
            .entry(user_id.to_owned())
            .or_default()
            .insert(therapist_id.to_owned());
        Ok(())
    }

    async fn remove(&self, user_id: &str, therapist_id: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        if let Some(mut set) = self.sets.get_mut(user_id) {
            set.remove(therapist_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discovery_sdk::{Filters, LifecycleStatus, ViewMode};

    use crate::config::DiscoveryConfig;
    use crate::domain::query::translate;

    fn live(id: &str, name: &str) -> Therapist {
        let mut t = Therapist::draft(id, name);
        t.account_status = LifecycleStatus::Live;
        t
    }

    #[tokio::test]
    async fn pages_follow_name_order_without_overlap() {
        let store = InMemoryTherapistStore::with_therapists(
            ["Eve", "Bob", "Dan", "Ann", "Cat"]
                .iter()
                .enumerate()
                .map(|(i, n)| live(&format!("t{i}"), n)),
        );
        let cfg = DiscoveryConfig {
            grid_page_size: 2,
            ..DiscoveryConfig::default()
        };

        let mut names = Vec::new();
        let mut cursor = None;
        loop {
            let q = translate(&Filters::default(), ViewMode::Grid, &cfg, cursor.take());
            let page = store.query(&q).await.unwrap();
            names.extend(page.items.iter().map(|t| t.name.clone()));
            if page.items.len() < q.limit {
                break;
            }
            cursor = page.next_cursor;
        }
        assert_eq!(names, vec!["Ann", "Bob", "Cat", "Dan", "Eve"]);
    }

    #[tokio::test]
    async fn non_live_records_are_not_queried() {
        let store = InMemoryTherapistStore::with_therapists([
            live("a", "Ann"),
            Therapist::draft("b", "Bob"),
        ]);
        let q = translate(
            &Filters::default(),
            ViewMode::Spotlight,
            &DiscoveryConfig::default(),
            None,
        );
        let page = store.query(&q).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(store.get("b").await.unwrap().map(|t| t.id), Some("b".to_owned()));
    }

    #[tokio::test]
    async fn failure_mode_reports_unavailable() {
        let store = InMemoryTherapistStore::new();
        store.set_failure(Some("quota exceeded"));
        let q = translate(
            &Filters::default(),
            ViewMode::Spotlight,
            &DiscoveryConfig::default(),
            None,
        );
        assert_eq!(
            store.query(&q).await,
            Err(StoreError::Unavailable("quota exceeded".to_owned()))
        );
    }

    #[tokio::test]
    async fn favorites_add_and_remove() {
        let store = InMemoryFavoritesStore::new();
        store.add("u1", "t1").await.unwrap();
        store.add("u1", "t2").await.unwrap();
        store.remove("u1", "t1").await.unwrap();
        assert_eq!(store.list("u1").await.unwrap(), ["t2".to_owned()].into());
        assert!(store.list("u2").await.unwrap().is_empty());
        assert_eq!(store.write_count(), 3);
    }
}
