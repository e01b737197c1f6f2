use serde::{Deserialize, Serialize};

/// Opaque continuation token marking the last document of a fetched page.
///
/// Only the store that issued it can interpret its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of results plus the cursor to request the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
    /// Number of documents the store returned before client-side refinement.
    pub fetched: usize,
    /// The store returned fewer documents than requested.
    pub is_last: bool,
}

impl<T> Page<T> {
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            fetched: self.fetched,
            is_last: self.is_last,
        }
    }
}
