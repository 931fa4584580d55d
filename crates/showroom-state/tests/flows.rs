//! Integration tests for the token-scoped bookmark and booking flows,
//! driven against scripted API collaborators.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use showroom_client::ApiError;
use showroom_model::{
    Booking, Bookmark, FuelType, NewBooking, NewBookmark, Paginated, Vehicle, VehicleRef,
};
use showroom_state::{
    BookingApi, BookingFlow, BookmarkApi, BookmarkFlow, Scope, TokenStore,
};

fn vehicle(id: i64) -> Vehicle {
    Vehicle {
        id,
        brand: "Tata".to_string(),
        name: format!("Model {id}"),
        price: 500_000 + id,
        fuel_type: FuelType::Electric,
        image_url: format!("https://example.com/{id}.png"),
        description: "Test vehicle".to_string(),
        created_at: Utc::now(),
    }
}

/// Scripted bookmark API that mints tokens the way the service does: reuse
/// the caller's token when one is attached, otherwise issue a fresh one.
#[derive(Default)]
struct ScriptedBookmarks {
    calls: Mutex<Vec<&'static str>>,
    attached_tokens: Mutex<Vec<Option<String>>>,
    served: Mutex<Vec<Bookmark>>,
    next_id: AtomicI64,
    fail_listing: bool,
}

impl ScriptedBookmarks {
    fn with_served(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            served: Mutex::new(bookmarks),
            ..Self::default()
        }
    }

    fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == name)
            .count()
    }
}

impl BookmarkApi for &ScriptedBookmarks {
    async fn bookmarks(&self, _token: &str) -> showroom_client::Result<Paginated<Bookmark>> {
        self.calls.lock().unwrap().push("bookmarks");
        if self.fail_listing {
            return Err(ApiError::Server { status: 503 });
        }
        let served = self.served.lock().unwrap().clone();
        Ok(Paginated {
            count: served.len() as u64,
            next: None,
            previous: None,
            results: served,
        })
    }

    async fn create_bookmark(&self, bookmark: &NewBookmark) -> showroom_client::Result<Bookmark> {
        self.calls.lock().unwrap().push("create_bookmark");
        self.attached_tokens
            .lock()
            .unwrap()
            .push(bookmark.bookmark_token.clone());
        let token = bookmark
            .bookmark_token
            .clone()
            .unwrap_or_else(|| "T1".to_string());
        let created = Bookmark {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            vehicle: VehicleRef::Embedded(vehicle(bookmark.vehicle)),
            bookmark_token: token,
            created_at: Utc::now(),
        };
        self.served.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_bookmark(&self, id: i64) -> showroom_client::Result<()> {
        self.calls.lock().unwrap().push("delete_bookmark");
        self.served
            .lock()
            .unwrap()
            .retain(|bookmark| bookmark.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn listing_without_token_issues_no_requests() {
    let api = ScriptedBookmarks::default();
    let flow = BookmarkFlow::new(&api, TokenStore::in_memory());

    let entries = flow.list().await.unwrap();
    assert!(entries.is_empty());
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn token_continuity_across_creates() {
    let api = ScriptedBookmarks::default();
    let tokens = TokenStore::in_memory();
    let flow = BookmarkFlow::new(&api, tokens.clone());

    // First create carries no token; the server mints one and it sticks.
    flow.add(1).await.unwrap();
    assert_eq!(tokens.get(Scope::Bookmark).as_deref(), Some("T1"));

    // Second create reuses the stored token.
    flow.add(2).await.unwrap();
    let attached = api.attached_tokens.lock().unwrap().clone();
    assert_eq!(attached, vec![None, Some("T1".to_string())]);

    let entries = flow.list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(api.call_count("bookmarks"), 1);
}

#[tokio::test]
async fn listing_dedupes_by_vehicle_and_skips_bare_ids() {
    let duplicate = vehicle(1);
    let api = ScriptedBookmarks::with_served(vec![
        Bookmark {
            id: 10,
            vehicle: VehicleRef::Embedded(duplicate.clone()),
            bookmark_token: "T1".to_string(),
            created_at: Utc::now(),
        },
        Bookmark {
            id: 11,
            vehicle: VehicleRef::Embedded(duplicate),
            bookmark_token: "T1".to_string(),
            created_at: Utc::now(),
        },
        Bookmark {
            id: 12,
            vehicle: VehicleRef::Id(2),
            bookmark_token: "T1".to_string(),
            created_at: Utc::now(),
        },
    ]);
    let tokens = TokenStore::in_memory();
    tokens.save(Scope::Bookmark, "T1");
    let flow = BookmarkFlow::new(&api, tokens);

    let entries = flow.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].bookmark_id, 10);
    assert_eq!(entries[0].vehicle.id, 1);
}

#[tokio::test]
async fn membership_probe_failure_reads_as_not_bookmarked() {
    let api = ScriptedBookmarks {
        fail_listing: true,
        ..ScriptedBookmarks::default()
    };
    let tokens = TokenStore::in_memory();
    tokens.save(Scope::Bookmark, "stale");
    let flow = BookmarkFlow::new(&api, tokens);

    assert!(!flow.is_bookmarked(1).await);
}

#[tokio::test]
async fn membership_probe_finds_bookmarked_vehicle() {
    let api = ScriptedBookmarks::with_served(vec![Bookmark {
        id: 10,
        vehicle: VehicleRef::Embedded(vehicle(3)),
        bookmark_token: "T1".to_string(),
        created_at: Utc::now(),
    }]);
    let tokens = TokenStore::in_memory();
    tokens.save(Scope::Bookmark, "T1");
    let flow = BookmarkFlow::new(&api, tokens);

    assert!(flow.is_bookmarked(3).await);
    assert!(!flow.is_bookmarked(4).await);
}

#[tokio::test]
async fn remove_vehicle_deletes_the_matching_bookmark() {
    let api = ScriptedBookmarks::with_served(vec![
        Bookmark {
            id: 10,
            vehicle: VehicleRef::Embedded(vehicle(1)),
            bookmark_token: "T1".to_string(),
            created_at: Utc::now(),
        },
        Bookmark {
            id: 11,
            vehicle: VehicleRef::Embedded(vehicle(2)),
            bookmark_token: "T1".to_string(),
            created_at: Utc::now(),
        },
    ]);
    let tokens = TokenStore::in_memory();
    tokens.save(Scope::Bookmark, "T1");
    let flow = BookmarkFlow::new(&api, tokens);

    assert!(flow.remove_vehicle(1).await.unwrap());
    assert_eq!(api.call_count("delete_bookmark"), 1);
    assert_eq!(api.served.lock().unwrap().len(), 1);

    assert!(!flow.remove_vehicle(99).await.unwrap());
    assert_eq!(api.call_count("delete_bookmark"), 1);
}

/// Scripted booking API with the same token-minting rule.
#[derive(Default)]
struct ScriptedBookings {
    calls: Mutex<Vec<&'static str>>,
    attached_tokens: Mutex<Vec<Option<String>>>,
    served: Mutex<Vec<Booking>>,
    next_id: AtomicI64,
}

impl BookingApi for &ScriptedBookings {
    async fn my_bookings(&self, _token: &str) -> showroom_client::Result<Vec<Booking>> {
        self.calls.lock().unwrap().push("my_bookings");
        Ok(self.served.lock().unwrap().clone())
    }

    async fn create_booking(&self, booking: &NewBooking) -> showroom_client::Result<Booking> {
        self.calls.lock().unwrap().push("create_booking");
        self.attached_tokens
            .lock()
            .unwrap()
            .push(booking.booking_token.clone());
        let token = booking
            .booking_token
            .clone()
            .unwrap_or_else(|| "BK-1".to_string());
        let created = Booking {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            vehicle: VehicleRef::Embedded(vehicle(booking.vehicle)),
            customer_name: booking.customer_name.clone(),
            customer_email: booking.customer_email.clone(),
            booking_token: token,
            created_at: Utc::now(),
        };
        self.served.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[tokio::test]
async fn bookings_short_circuit_without_token() {
    let api = ScriptedBookings::default();
    let flow = BookingFlow::new(&api, TokenStore::in_memory());

    let bookings = flow.list().await.unwrap();
    assert!(bookings.is_empty());
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn booking_creation_saves_and_reuses_the_token() {
    let api = ScriptedBookings::default();
    let tokens = TokenStore::in_memory();
    let flow = BookingFlow::new(&api, tokens.clone());

    let created = flow.create(5, "Asha Rao", "asha@example.com").await.unwrap();
    assert_eq!(created.booking_token, "BK-1");
    assert_eq!(tokens.get(Scope::Booking).as_deref(), Some("BK-1"));

    flow.create(6, "Asha Rao", "asha@example.com").await.unwrap();
    let attached = api.attached_tokens.lock().unwrap().clone();
    assert_eq!(attached, vec![None, Some("BK-1".to_string())]);

    let bookings = flow.list().await.unwrap();
    assert_eq!(bookings.len(), 2);
}

#[tokio::test]
async fn booking_token_does_not_leak_into_bookmark_scope() {
    let api = ScriptedBookings::default();
    let tokens = TokenStore::in_memory();
    let flow = BookingFlow::new(&api, tokens.clone());

    flow.create(5, "Asha Rao", "asha@example.com").await.unwrap();
    assert!(tokens.exists(Scope::Booking));
    assert!(!tokens.exists(Scope::Bookmark));
}
