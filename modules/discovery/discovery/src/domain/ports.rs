//! Output ports: the document store and the per-user favorites collection.
//!
//! Both are external managed services. The domain only depends on these
//! traits; `infra::storage` ships in-memory implementations.

use std::collections::BTreeSet;

use async_trait::async_trait;
use discovery_sdk::{Cursor, LifecycleStatus, Therapist};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid cursor")]
    InvalidCursor,
}

/// Array-valued therapist fields the store can filter with `array-contains-any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Specializations,
    Languages,
    Availability,
}

impl TagField {
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            TagField::Specializations => "specializations",
            TagField::Languages => "languages",
            TagField::Availability => "availability",
        }
    }

    #[must_use]
    pub fn values(self, therapist: &Therapist) -> &[String] {
        match self {
            TagField::Specializations => &therapist.specializations,
            TagField::Languages => &therapist.languages,
            TagField::Availability => &therapist.availability,
        }
    }
}

/// Server-side predicate. All constraints of a query are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    StatusEquals(LifecycleStatus),
    /// Matches when the field holds at least one of `values`.
    ArrayContainsAny { field: TagField, values: Vec<String> },
}

impl Constraint {
    #[must_use]
    pub fn matches(&self, therapist: &Therapist) -> bool {
        match self {
            Constraint::StatusEquals(status) => therapist.account_status == *status,
            Constraint::ArrayContainsAny { field, values } => field
                .values(therapist)
                .iter()
                .any(|v| values.contains(v)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    Name,
}

/// Remote query against the `therapistsData` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistQuery {
    pub constraints: Vec<Constraint>,
    pub order_by: OrderField,
    pub limit: usize,
    pub start_after: Option<Cursor>,
}

impl TherapistQuery {
    #[must_use]
    pub fn matches(&self, therapist: &Therapist) -> bool {
        self.constraints.iter().all(|c| c.matches(therapist))
    }
}

/// Raw page as returned by the store, before client-side refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePage {
    pub items: Vec<Therapist>,
    pub next_cursor: Option<Cursor>,
}

#[async_trait]
pub trait TherapistStore: Send + Sync {
    async fn query(&self, query: &TherapistQuery) -> Result<StorePage, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Therapist>, StoreError>;
}

/// Per-user `favorites` sub-collection keyed by therapist id.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<BTreeSet<String>, StoreError>;

    async fn add(&self, user_id: &str, therapist_id: &str) -> Result<(), StoreError>;

    async fn remove(&self, user_id: &str, therapist_id: &str) -> Result<(), StoreError>;
}
