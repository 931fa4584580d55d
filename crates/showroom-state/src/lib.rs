//! Client-side state management for the Showroom storefront.
//!
//! This crate holds the pieces of the storefront that must behave
//! correctly independent of any UI framework:
//!
//! - [`TokenStore`]: anonymous identity tokens persisted per resource
//!   scope (bookmarks, bookings), minted by the server and only stored
//!   here.
//! - [`PagedQuery`]: the state machine behind every paginated, filterable
//!   list view, including race-safe handling of overlapping fetches.
//! - [`RangeSelector`]: dual-handle numeric range selection with clamping
//!   and handle-priority arbitration.
//! - [`BookmarkFlow`] / [`BookingFlow`]: token-scoped listing and
//!   creation, short-circuiting to empty collections when no identity
//!   exists yet.

pub mod flows;
pub mod query;
pub mod range;
pub mod token;

pub use flows::{BookingApi, BookingFlow, BookmarkApi, BookmarkEntry, BookmarkFlow};
pub use query::{FetchFuture, Filters, PageInfo, PageRequest, PagedQuery, Phase, QueryState};
pub use range::{Handle, PROXIMITY_THRESHOLD, RangeSelector};
pub use token::{FileBackend, MemoryBackend, Scope, TokenBackend, TokenStore};
