pub mod error;
pub mod favorites;
pub mod pagination;
pub mod ports;
pub mod presenter;
pub mod query;
pub mod refine;
pub mod service;
pub mod session;
