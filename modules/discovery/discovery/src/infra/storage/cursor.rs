//! Continuation token of the in-memory store.
//!
//! base64url (no padding) of a small versioned JSON document holding the sort
//! key of the last returned record.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use discovery_sdk::Cursor;
use serde::{Deserialize, Serialize};

use crate::domain::ports::StoreError;

const VERSION: u8 = 1;

/// Sort key `(name, id)` of the last record on a page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameKey {
    pub name: String,
    pub id: String,
}

#[derive(Serialize, Deserialize)]
struct Wire {
    v: u8,
    n: String,
    i: String,
}

pub fn encode(key: &NameKey) -> Result<Cursor, StoreError> {
    let wire = Wire {
        v: VERSION,
        n: key.name.clone(),
        i: key.id.clone(),
    };
    let bytes =
        serde_json::to_vec(&wire).map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(Cursor::new(URL_SAFE_NO_PAD.encode(bytes)))
}

pub fn decode(cursor: &Cursor) -> Result<NameKey, StoreError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor.as_str())
        .map_err(|_| StoreError::InvalidCursor)?;
    let wire: Wire = serde_json::from_slice(&bytes).map_err(|_| StoreError::InvalidCursor)?;
    if wire.v != VERSION {
        return Err(StoreError::InvalidCursor);
    }
    Ok(NameKey {
        name: wire.n,
        id: wire.i,
    })
}
