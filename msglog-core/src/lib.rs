//! # msglog-core
//!
//! Shared building blocks for the message log API: request parameter validation
//! ([`DateRange`], [`PathFilter`], simulation counts), the [`ValidationError`]
//! taxonomy, and tracing initialization. Transport-agnostic; used by storage and msglog-api.

pub mod error;
pub mod logger;
pub mod range;

pub use error::ValidationError;
pub use logger::init_tracing;
pub use range::{parse_datetime, validate_count, DateRange, PathFilter};
