//! In-memory adapters for the discovery ports.

pub mod cursor;
pub mod memory;

pub use memory::{InMemoryFavoritesStore, InMemoryTherapistStore};
