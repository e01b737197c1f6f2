//! Therapist profiles share the discovery module's document collection.

use async_trait::async_trait;
use discovery::infra::storage::InMemoryTherapistStore;
use discovery_sdk::{LifecycleStatus, Therapist};

use crate::domain::ports::ProfileStore;

#[async_trait]
impl ProfileStore for InMemoryTherapistStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<Therapist>> {
        Ok(self.find(id))
    }

    async fn put(&self, therapist: Therapist) -> anyhow::Result<()> {
        self.upsert(therapist);
        Ok(())
    }

    async fn list_by_status(&self, status: LifecycleStatus) -> anyhow::Result<Vec<Therapist>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|t| t.account_status == status)
            .collect())
    }
}
