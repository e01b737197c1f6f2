//! Output ports of the marketplace domain.
//!
//! Document collections (therapist profiles, clinics, inquiries, activity
//! log) and object storage are external managed services; `infra::storage`
//! ships in-memory implementations.

use async_trait::async_trait;
use discovery_sdk::{LifecycleStatus, Therapist};
use marketplace_sdk::{ActivityLog, Clinic, InquiryStatus, UserInquiry};

/// Therapist profile documents, keyed by the owner's user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> anyhow::Result<Option<Therapist>>;

    async fn put(&self, therapist: Therapist) -> anyhow::Result<()>;

    async fn list_by_status(&self, status: LifecycleStatus) -> anyhow::Result<Vec<Therapist>>;
}

/// Clinic documents, keyed by the owner's user id. Space listings are embedded.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn get(&self, id: &str) -> anyhow::Result<Option<Clinic>>;

    async fn put(&self, clinic: Clinic) -> anyhow::Result<()>;

    async fn list_by_status(&self, status: LifecycleStatus) -> anyhow::Result<Vec<Clinic>>;
}

#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn get(&self, id: &str) -> anyhow::Result<Option<UserInquiry>>;

    async fn put(&self, inquiry: UserInquiry) -> anyhow::Result<()>;

    /// Newest first. `None` lists every status.
    async fn list(&self, status: Option<InquiryStatus>) -> anyhow::Result<Vec<UserInquiry>>;
}

/// Append-only audit trail.
#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    async fn append(&self, entry: ActivityLog) -> anyhow::Result<()>;

    /// Most recent entries first.
    async fn recent(&self, limit: usize) -> anyhow::Result<Vec<ActivityLog>>;
}

/// Blob storage for uploaded media. Objects are addressed by their public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
    -> anyhow::Result<String>;

    async fn delete(&self, url: &str) -> anyhow::Result<()>;

    /// Path of the object behind `url`, or `None` when this storage did not issue it.
    fn object_path(&self, url: &str) -> Option<String>;
}
