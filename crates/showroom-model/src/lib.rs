//! Data model for the Showroom vehicle storefront client.
//!
//! Types in this crate mirror the Resource Service wire contract: vehicles,
//! bookmarks, bookings, paginated envelopes, and the typed filter set used
//! by list queries. Everything here is plain data, no I/O.

pub mod booking;
pub mod bookmark;
pub mod error;
pub mod filters;
pub mod page;
pub mod price;
pub mod vehicle;

pub use booking::{Booking, BookingsPayload, NewBooking};
pub use bookmark::{Bookmark, NewBookmark};
pub use error::{ModelError, Result};
pub use filters::VehicleFilters;
pub use page::Paginated;
pub use price::format_inr;
pub use vehicle::{FuelType, NewVehicle, Vehicle, VehicleRef, VehicleSummary};
