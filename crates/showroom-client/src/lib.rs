//! HTTP client for the Showroom Resource Service.
//!
//! Wraps every operation of the service's REST contract behind typed
//! async methods: vehicle listing with filters and pagination, vehicle
//! detail, admin creation, bookmarks, bookings, and the per-brand summary.
//!
//! Failures are mapped onto [`ApiError`], which carries a user-displayable
//! message; callers render `user_message()` and may retry when
//! `is_retryable()` says so.

pub mod client;
pub mod config;
pub mod error;

pub use client::ShowroomClient;
pub use config::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
