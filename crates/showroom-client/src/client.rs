//! Typed wrappers over the Resource Service's REST endpoints.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use showroom_model::{
    Booking, BookingsPayload, Bookmark, NewBooking, NewBookmark, NewVehicle, Paginated, Vehicle,
    VehicleFilters, VehicleSummary,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Showroom Resource Service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ShowroomClient {
    /// HTTP client.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl ShowroomClient {
    /// Create a new client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List vehicles for one page, applying the given filters.
    pub async fn list_vehicles(
        &self,
        page: u32,
        filters: &VehicleFilters,
    ) -> Result<Paginated<Vehicle>> {
        let mut query: Vec<(&str, String)> = vec![("page", page.to_string())];
        query.extend(filters.query_pairs());
        debug!(page, ?filters, "Fetching vehicle page");

        let response = self
            .http
            .get(self.url("/vehicles"))
            .query(&query)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch a single vehicle by id.
    pub async fn vehicle(&self, id: i64) -> Result<Vehicle> {
        debug!(id, "Fetching vehicle detail");
        let response = self
            .http
            .get(self.url(&format!("/vehicles/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    /// Create a vehicle (admin operation).
    ///
    /// The admin credential travels as a bearer-style header; an invalid
    /// credential surfaces as [`ApiError::Auth`] with the service's detail
    /// message.
    pub async fn create_vehicle(&self, vehicle: &NewVehicle, admin_token: &str) -> Result<Vehicle> {
        debug!(brand = %vehicle.brand, name = %vehicle.name, "Creating vehicle");
        let response = self
            .http
            .post(self.url("/vehicles"))
            .header(AUTHORIZATION, format!("Bearer {admin_token}"))
            .json(vehicle)
            .send()
            .await?;
        decode(response).await
    }

    /// List bookmarks belonging to the given identity token.
    pub async fn bookmarks(&self, token: &str) -> Result<Paginated<Bookmark>> {
        debug!("Fetching bookmarks");
        let response = self
            .http
            .get(self.url("/bookmarks"))
            .query(&[("token", token)])
            .send()
            .await?;
        decode(response).await
    }

    /// Create a bookmark.
    pub async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark> {
        debug!(vehicle = bookmark.vehicle, "Creating bookmark");
        let response = self
            .http
            .post(self.url("/bookmarks"))
            .json(bookmark)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a bookmark by id.
    pub async fn delete_bookmark(&self, id: i64) -> Result<()> {
        debug!(id, "Deleting bookmark");
        let response = self
            .http
            .delete(self.url(&format!("/bookmarks/{id}")))
            .send()
            .await?;
        decode_empty(response).await
    }

    /// Create a booking.
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking> {
        debug!(vehicle = booking.vehicle, "Creating booking");
        let response = self
            .http
            .post(self.url("/bookings"))
            .json(booking)
            .send()
            .await?;
        decode(response).await
    }

    /// List bookings belonging to the given identity token.
    ///
    /// The endpoint has served both a plain array and a paginated envelope;
    /// both are normalized to a plain sequence.
    pub async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>> {
        debug!("Fetching bookings");
        let response = self
            .http
            .get(self.url("/bookings/my"))
            .query(&[("token", token)])
            .send()
            .await?;
        let payload: BookingsPayload = decode(response).await?;
        Ok(payload.into_bookings())
    }

    /// Fetch the per-brand inventory summary.
    pub async fn vehicle_summary(&self) -> Result<Vec<VehicleSummary>> {
        debug!("Fetching vehicle summary");
        let response = self
            .http
            .get(self.url("/vehicles/summary"))
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a JSON body, or map a failure status onto [`ApiError`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ApiError::from);
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_for_status(status.as_u16(), &body))
}

/// Like [`decode`] for endpoints whose success responses have no body.
async fn decode_empty(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(error_for_status(status.as_u16(), &body))
}

/// Map a failure status code and body onto the error taxonomy.
fn error_for_status(status: u16, body: &str) -> ApiError {
    let detail = extract_detail(body);
    match status {
        404 => ApiError::NotFound,
        401 | 403 => ApiError::Auth { detail },
        400 | 422 => ApiError::Validation { detail },
        status if (400..500).contains(&status) => ApiError::Client { status, detail },
        status => ApiError::Server { status },
    }
}

/// Pull the service's display message out of an error body.
///
/// `detail` is preferred over `message`; a body that is not JSON yields
/// nothing and callers fall back to a generic message.
fn extract_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail.or(parsed.message))
}
