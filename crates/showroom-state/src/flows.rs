//! Token-scoped bookmark and booking flows.
//!
//! Both flows layer one composition rule over [`TokenStore`] and the
//! Resource Service: if no identity token exists for the scope, the
//! collection is empty and no request is issued; otherwise the stored
//! token scopes the request. Creation attaches the stored token when one
//! exists, and whatever token the server returns is saved unconditionally;
//! the server is authoritative.
//!
//! The service API is injected through small traits so the flows can be
//! exercised against a scripted collaborator.

use std::collections::HashSet;

use tracing::debug;

use showroom_client::{Result, ShowroomClient};
use showroom_model::{Booking, Bookmark, NewBooking, NewBookmark, Paginated, Vehicle};

use crate::token::{Scope, TokenStore};

/// Bookmark operations consumed by [`BookmarkFlow`].
pub trait BookmarkApi {
    async fn bookmarks(&self, token: &str) -> Result<Paginated<Bookmark>>;
    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark>;
    async fn delete_bookmark(&self, id: i64) -> Result<()>;
}

/// Booking operations consumed by [`BookingFlow`].
pub trait BookingApi {
    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>>;
    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking>;
}

impl BookmarkApi for ShowroomClient {
    async fn bookmarks(&self, token: &str) -> Result<Paginated<Bookmark>> {
        ShowroomClient::bookmarks(self, token).await
    }

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark> {
        ShowroomClient::create_bookmark(self, bookmark).await
    }

    async fn delete_bookmark(&self, id: i64) -> Result<()> {
        ShowroomClient::delete_bookmark(self, id).await
    }
}

impl BookingApi for ShowroomClient {
    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>> {
        ShowroomClient::my_bookings(self, token).await
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking> {
        ShowroomClient::create_booking(self, booking).await
    }
}

/// A bookmark entry ready for display: the bookmark's id plus the embedded
/// vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkEntry {
    pub bookmark_id: i64,
    pub vehicle: Vehicle,
}

/// Bookmark listing and mutation scoped to the anonymous identity.
pub struct BookmarkFlow<A> {
    api: A,
    tokens: TokenStore,
}

impl<A: BookmarkApi> BookmarkFlow<A> {
    pub fn new(api: A, tokens: TokenStore) -> Self {
        Self { api, tokens }
    }

    /// List this identity's bookmarks, deduplicated by vehicle id.
    ///
    /// Without a stored token the collection is empty and no request is
    /// issued.
    pub async fn list(&self) -> Result<Vec<BookmarkEntry>> {
        let Some(token) = self.tokens.get(Scope::Bookmark) else {
            debug!("No bookmark token; collection is empty");
            return Ok(Vec::new());
        };
        let page = self.api.bookmarks(&token).await?;
        Ok(dedupe_by_vehicle(page.results))
    }

    /// Bookmark a vehicle, reusing the stored identity token when present
    /// and saving whichever token the server responds with.
    pub async fn add(&self, vehicle_id: i64) -> Result<Bookmark> {
        let request = NewBookmark {
            vehicle: vehicle_id,
            bookmark_token: self.tokens.get(Scope::Bookmark),
        };
        let created = self.api.create_bookmark(&request).await?;
        self.tokens.save(Scope::Bookmark, &created.bookmark_token);
        Ok(created)
    }

    /// Delete a bookmark by its id.
    pub async fn remove(&self, bookmark_id: i64) -> Result<()> {
        self.api.delete_bookmark(bookmark_id).await
    }

    /// Remove whichever bookmark references the given vehicle.
    ///
    /// Returns `false` when no such bookmark exists.
    pub async fn remove_vehicle(&self, vehicle_id: i64) -> Result<bool> {
        let Some(token) = self.tokens.get(Scope::Bookmark) else {
            return Ok(false);
        };
        let page = self.api.bookmarks(&token).await?;
        let Some(bookmark) = page
            .results
            .iter()
            .find(|bookmark| bookmark.vehicle.id() == vehicle_id)
        else {
            return Ok(false);
        };
        self.api.delete_bookmark(bookmark.id).await?;
        Ok(true)
    }

    /// Whether the given vehicle is bookmarked under this identity.
    ///
    /// A failing probe (e.g. a token the server no longer recognizes)
    /// reads as "not bookmarked", never as an error.
    pub async fn is_bookmarked(&self, vehicle_id: i64) -> bool {
        let Some(token) = self.tokens.get(Scope::Bookmark) else {
            return false;
        };
        match self.api.bookmarks(&token).await {
            Ok(page) => page
                .results
                .iter()
                .any(|bookmark| bookmark.vehicle.id() == vehicle_id),
            Err(error) => {
                debug!(%error, "Bookmark probe failed; treating as not bookmarked");
                false
            }
        }
    }
}

/// Booking listing and creation scoped to the anonymous identity.
pub struct BookingFlow<A> {
    api: A,
    tokens: TokenStore,
}

impl<A: BookingApi> BookingFlow<A> {
    pub fn new(api: A, tokens: TokenStore) -> Self {
        Self { api, tokens }
    }

    /// List this identity's bookings, or an empty sequence with no request
    /// when no token is stored.
    pub async fn list(&self) -> Result<Vec<Booking>> {
        let Some(token) = self.tokens.get(Scope::Booking) else {
            debug!("No booking token; collection is empty");
            return Ok(Vec::new());
        };
        self.api.my_bookings(&token).await
    }

    /// Book a vehicle, reusing the stored identity token when present and
    /// saving whichever token the server responds with.
    pub async fn create(
        &self,
        vehicle_id: i64,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
    ) -> Result<Booking> {
        let request = NewBooking {
            vehicle: vehicle_id,
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            booking_token: self.tokens.get(Scope::Booking),
        };
        let created = self.api.create_booking(&request).await?;
        self.tokens.save(Scope::Booking, &created.booking_token);
        Ok(created)
    }
}

/// Keep the first bookmark for each vehicle id, in listing order, dropping
/// records that carry only a vehicle id.
fn dedupe_by_vehicle(bookmarks: Vec<Bookmark>) -> Vec<BookmarkEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for bookmark in bookmarks {
        let Some(vehicle) = bookmark.vehicle.vehicle() else {
            debug!(
                bookmark_id = bookmark.id,
                "Skipping bookmark without an embedded vehicle"
            );
            continue;
        };
        if seen.insert(vehicle.id) {
            entries.push(BookmarkEntry {
                bookmark_id: bookmark.id,
                vehicle: vehicle.clone(),
            });
        }
    }
    entries
}
