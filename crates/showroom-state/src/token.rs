//! Anonymous identity tokens, persisted per resource scope.
//!
//! The server mints an opaque token on the first successful write in a
//! scope; the client only stores it and sends it back. Tokens never expire
//! and are removed only by an explicit clear.
//!
//! Every operation here is infallible from the caller's point of view: a
//! missing or unreadable backing store reads as "no token", and a failed
//! write is logged and swallowed. Downstream, an absent token degrades the
//! scoped list flows to empty collections rather than errors.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

/// A category of anonymously-owned resources with its own identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Bookmark,
    Booking,
}

impl Scope {
    /// Fixed storage key for this scope's token.
    #[must_use]
    pub fn storage_key(&self) -> &'static str {
        match self {
            Scope::Bookmark => "bookmark_token",
            Scope::Booking => "booking_token",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Bookmark => "bookmark",
            Scope::Booking => "booking",
        }
    }

    /// Both scopes.
    pub const ALL: [Scope; 2] = [Self::Bookmark, Self::Booking];
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Storage medium for tokens.
///
/// `write` and `remove` report success as `bool` rather than a `Result`;
/// the store logs failures and carries on, per the degradation contract.
pub trait TokenBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// Token storage in a small TOML document under the platform config
/// directory.
///
/// Read errors of any kind (missing file, bad TOML, unreadable directory)
/// collapse to an empty document.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend writing to the given file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default token file location.
    #[must_use]
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Showroom", "Showroom")
            .map(|dirs| dirs.config_dir().join("tokens.toml"))
            .unwrap_or_else(|| PathBuf::from("tokens.toml"))
    }

    fn load(&self) -> toml::Table {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.parse::<toml::Table>().ok())
            .unwrap_or_default()
    }

    fn store(&self, table: &toml::Table) -> bool {
        if let Some(parent) = self.path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        let Ok(content) = toml::to_string(table) else {
            return false;
        };
        std::fs::write(&self.path, content).is_ok()
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.load()
            .get(key)
            .and_then(toml::Value::as_str)
            .map(str::to_string)
    }

    fn write(&self, key: &str, value: &str) -> bool {
        let mut table = self.load();
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.store(&table)
    }

    fn remove(&self, key: &str) -> bool {
        let mut table = self.load();
        if table.remove(key).is_none() {
            // Nothing stored; removal is trivially complete.
            return true;
        }
        self.store(&table)
    }
}

/// In-memory token storage for tests and embedding.
#[derive(Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl TokenBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.map.lock().unwrap().remove(key);
        true
    }
}

/// Process-wide store of anonymous identity tokens, one per [`Scope`].
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn TokenBackend>,
}

impl TokenStore {
    /// Store over an explicit backend.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn TokenBackend>) -> Self {
        Self { backend }
    }

    /// Store over the default token file.
    #[must_use]
    pub fn from_default_file() -> Self {
        Self::with_backend(Arc::new(FileBackend::default()))
    }

    /// Store over a token file at the given path.
    #[must_use]
    pub fn from_file(path: PathBuf) -> Self {
        Self::with_backend(Arc::new(FileBackend::new(path)))
    }

    /// Volatile store, mainly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::default()))
    }

    /// The token for a scope, if one has been saved.
    #[must_use]
    pub fn get(&self, scope: Scope) -> Option<String> {
        self.backend.read(scope.storage_key())
    }

    /// Save a token, overwriting any existing one for the scope.
    ///
    /// Persistence trouble is logged and swallowed; the next `get` simply
    /// reads as absent.
    pub fn save(&self, scope: Scope, token: &str) {
        if self.backend.write(scope.storage_key(), token) {
            debug!(%scope, "Saved identity token");
        } else {
            warn!(%scope, "Token storage unavailable; token not persisted");
        }
    }

    /// Remove the token for a scope. Idempotent.
    pub fn clear(&self, scope: Scope) {
        if !self.backend.remove(scope.storage_key()) {
            warn!(%scope, "Token storage unavailable; clear had no effect");
        }
    }

    /// Whether a token exists for the scope.
    #[must_use]
    pub fn exists(&self, scope: Scope) -> bool {
        self.get(scope).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_are_independent() {
        let store = TokenStore::in_memory();
        store.save(Scope::Bookmark, "BM-1");
        assert_eq!(store.get(Scope::Bookmark).as_deref(), Some("BM-1"));
        assert_eq!(store.get(Scope::Booking), None);
        assert!(store.exists(Scope::Bookmark));
        assert!(!store.exists(Scope::Booking));
    }

    #[test]
    fn save_overwrites_last_write_wins() {
        let store = TokenStore::in_memory();
        store.save(Scope::Booking, "old");
        store.save(Scope::Booking, "new");
        assert_eq!(store.get(Scope::Booking).as_deref(), Some("new"));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = TokenStore::in_memory();
        store.save(Scope::Bookmark, "BM-1");
        store.clear(Scope::Bookmark);
        assert_eq!(store.get(Scope::Bookmark), None);
        store.clear(Scope::Bookmark);
        assert_eq!(store.get(Scope::Bookmark), None);
    }

    #[test]
    fn file_backend_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.toml");
        let store = TokenStore::from_file(path.clone());

        assert_eq!(store.get(Scope::Bookmark), None);
        store.save(Scope::Bookmark, "BM-7");
        store.save(Scope::Booking, "BK-3");

        // A fresh store over the same file sees the persisted tokens.
        let reopened = TokenStore::from_file(path);
        assert_eq!(reopened.get(Scope::Bookmark).as_deref(), Some("BM-7"));
        assert_eq!(reopened.get(Scope::Booking).as_deref(), Some("BK-3"));

        reopened.clear(Scope::Bookmark);
        assert_eq!(reopened.get(Scope::Bookmark), None);
        assert_eq!(reopened.get(Scope::Booking).as_deref(), Some("BK-3"));
    }

    #[test]
    fn corrupt_file_reads_as_no_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let store = TokenStore::from_file(path);
        assert_eq!(store.get(Scope::Bookmark), None);
        // Saving replaces the unreadable document.
        store.save(Scope::Bookmark, "BM-1");
        assert_eq!(store.get(Scope::Bookmark).as_deref(), Some("BM-1"));
    }

    struct UnavailableBackend;

    impl TokenBackend for UnavailableBackend {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }
        fn write(&self, _key: &str, _value: &str) -> bool {
            false
        }
        fn remove(&self, _key: &str) -> bool {
            false
        }
    }

    #[test]
    fn unavailable_backend_degrades_silently() {
        let store = TokenStore::with_backend(Arc::new(UnavailableBackend));
        store.save(Scope::Bookmark, "BM-1");
        assert_eq!(store.get(Scope::Bookmark), None);
        store.clear(Scope::Bookmark);
        assert!(!store.exists(Scope::Bookmark));
    }
}
