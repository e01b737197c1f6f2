//! In-memory adapters for the marketplace ports.

mod memory;
mod profiles;

pub use memory::{
    InMemoryActivityLog, InMemoryClinicStore, InMemoryInquiryStore, InMemoryObjectStorage,
};
