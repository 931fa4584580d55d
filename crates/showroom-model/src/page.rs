//! Paginated response envelope.

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
///
/// `next` and `previous` are opaque links; only their presence is
/// meaningful to the client (page navigation is index-based).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// An empty page with no neighbors.
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}
