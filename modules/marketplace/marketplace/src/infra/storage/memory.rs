//! In-memory clinic, inquiry and activity collections plus object storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use dashmap::DashMap;
use discovery_sdk::LifecycleStatus;
use marketplace_sdk::{ActivityLog, Clinic, InquiryStatus, UserInquiry};
use parking_lot::{Mutex, RwLock};

use crate::domain::ports::{ActivityLogStore, ClinicStore, InquiryStore, ObjectStorage};

#[derive(Debug, Default)]
pub struct InMemoryClinicStore {
    records: RwLock<BTreeMap<String, Clinic>>,
}

impl InMemoryClinicStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clinics(items: impl IntoIterator<Item = Clinic>) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.write();
            for clinic in items {
                records.insert(clinic.id.clone(), clinic);
            }
        }
        store
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<Clinic> {
        self.records.read().get(id).cloned()
    }
}

#[async_trait]
impl ClinicStore for InMemoryClinicStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<Clinic>> {
        Ok(self.find(id))
    }

    async fn put(&self, clinic: Clinic) -> anyhow::Result<()> {
        self.records.write().insert(clinic.id.clone(), clinic);
        Ok(())
    }

    async fn list_by_status(&self, status: LifecycleStatus) -> anyhow::Result<Vec<Clinic>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|c| c.account_status == status)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryInquiryStore {
    records: RwLock<BTreeMap<String, UserInquiry>>,
}

impl InMemoryInquiryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryStore for InMemoryInquiryStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<UserInquiry>> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn put(&self, inquiry: UserInquiry) -> anyhow::Result<()> {
        self.records.write().insert(inquiry.id.clone(), inquiry);
        Ok(())
    }

    async fn list(&self, status: Option<InquiryStatus>) -> anyhow::Result<Vec<UserInquiry>> {
        let mut items: Vec<UserInquiry> = self
            .records
            .read()
            .values()
            .filter(|i| status.is_none_or(|s| i.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryActivityLog {
    entries: Mutex<Vec<ActivityLog>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following append fail with `message`; `None` restores normal operation.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_owned);
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<ActivityLog> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl ActivityLogStore for InMemoryActivityLog {
    async fn append(&self, entry: ActivityLog) -> anyhow::Result<()> {
        if let Some(message) = self.failure.lock().as_deref() {
            bail!("activity log unavailable: {message}");
        }
        self.entries.lock().push(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> anyhow::Result<Vec<ActivityLog>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object storage keyed by path; URLs are `{base_url}/{path}`.
#[derive(Debug)]
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: DashMap<String, StoredObject>,
    failure: Mutex<Option<String>>,
    uploads: AtomicUsize,
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new("memory://theraway-uploads")
    }
}

impl InMemoryObjectStorage {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            objects: DashMap::new(),
            failure: Mutex::new(None),
            uploads: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Make every following call fail with `message`; `None` restores normal operation.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_owned);
    }

    /// Number of `upload` calls that reached storage, failed or not.
    #[must_use]
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn contains_url(&self, url: &str) -> bool {
        self.path_of(url)
            .is_some_and(|path| self.objects.contains_key(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn path_of<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.base_url.as_str())?.strip_prefix('/')
    }

    fn check(&self) -> anyhow::Result<()> {
        match self.failure.lock().as_deref() {
            Some(message) => Err(anyhow!("object storage unavailable: {message}")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<String> {
        self.uploads.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        self.objects.insert(
            path.to_owned(),
            StoredObject {
                bytes,
                content_type: content_type.to_owned(),
            },
        );
        Ok(self.url_for(path))
    }

    async fn delete(&self, url: &str) -> anyhow::Result<()> {
        self.check()?;
        let path = self
            .path_of(url)
            .ok_or_else(|| anyhow!("url is not served by this storage: {url}"))?;
        self.objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| anyhow!("object not found: {path}"))
    }

    fn object_path(&self, url: &str) -> Option<String> {
        self.path_of(url).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn inquiry(id: &str, status: InquiryStatus, minutes_ago: i64) -> UserInquiry {
        UserInquiry {
            id: id.to_owned(),
            user_id: None,
            email: "sam@example.com".to_owned(),
            subject: "Hello".to_owned(),
            message: "Question".to_owned(),
            status,
            admin_reply: None,
            created_at: OffsetDateTime::now_utc() - time::Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn object_storage_round_trip() {
        let storage = InMemoryObjectStorage::default();
        let url = storage
            .upload("u1/profile_pictures/x-a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "memory://theraway-uploads/u1/profile_pictures/x-a.png");
        assert!(storage.contains_url(&url));

        storage.delete(&url).await.unwrap();
        assert!(storage.is_empty());
        assert!(storage.delete(&url).await.is_err());
        assert!(storage.delete("https://elsewhere/x").await.is_err());
        assert_eq!(
            storage.object_path(&url).as_deref(),
            Some("u1/profile_pictures/x-a.png")
        );
        assert_eq!(storage.object_path("https://elsewhere/u1/x"), None);
    }

    #[tokio::test]
    async fn failing_storage_counts_attempts() {
        let storage = InMemoryObjectStorage::default();
        storage.set_failure(Some("quota exceeded"));
        let err = storage.upload("p", vec![1], "image/png").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(storage.upload_count(), 1);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn inquiries_list_newest_first_with_status_filter() {
        let store = InMemoryInquiryStore::new();
        store.put(inquiry("old", InquiryStatus::Open, 30)).await.unwrap();
        store.put(inquiry("new", InquiryStatus::Open, 1)).await.unwrap();
        store
            .put(inquiry("done", InquiryStatus::Closed, 5))
            .await
            .unwrap();

        let open: Vec<String> = store
            .list(Some(InquiryStatus::Open))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(open, vec!["new", "old"]);
        assert_eq!(store.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn activity_recent_is_newest_first() {
        let log = InMemoryActivityLog::new();
        for i in 0..3 {
            log.append(ActivityLog {
                id: format!("a{i}"),
                actor_id: "admin".to_owned(),
                action: "therapist.approved".to_owned(),
                target_id: format!("t{i}"),
                details: None,
                at: OffsetDateTime::now_utc(),
            })
            .await
            .unwrap();
        }
        let recent: Vec<String> = log
            .recent(2)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(recent, vec!["a2", "a1"]);
    }
}
