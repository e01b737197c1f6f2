pub mod error;
pub mod lifecycle;
pub mod locale;
pub mod ports;
pub mod service;
pub mod uploads;
