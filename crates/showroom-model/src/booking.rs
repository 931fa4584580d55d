//! Booking records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page::Paginated;
use crate::vehicle::VehicleRef;

/// A confirmed booking, scoped to an anonymous identity token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub vehicle: VehicleRef,
    pub customer_name: String,
    pub customer_email: String,
    pub booking_token: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a booking.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub vehicle: i64,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_token: Option<String>,
}

/// Wire shape of the "my bookings" listing.
///
/// The service has shipped both a plain array and a paginated envelope for
/// this endpoint; both are accepted and normalized to a plain sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookingsPayload {
    Plain(Vec<Booking>),
    Paged(Paginated<Booking>),
}

impl BookingsPayload {
    /// Normalize either wire shape to a plain sequence.
    #[must_use]
    pub fn into_bookings(self) -> Vec<Booking> {
        match self {
            BookingsPayload::Plain(bookings) => bookings,
            BookingsPayload::Paged(page) => page.results,
        }
    }
}
