//! Bookmark records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleRef;

/// A saved bookmark, scoped to an anonymous identity token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub vehicle: VehicleRef,
    pub bookmark_token: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a bookmark.
///
/// The token is attached only when the client already holds one, so the
/// server can group the new bookmark under the same identity.
#[derive(Debug, Clone, Serialize)]
pub struct NewBookmark {
    pub vehicle: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_token: Option<String>,
}
