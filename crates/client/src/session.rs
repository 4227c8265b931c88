//! Session credential storage.
//!
//! The session is three string entries: the bearer `token`, the account
//! `role` and the account `id`. They are written at login, read on every
//! outgoing request and cleared at logout.
//!
//! Two stores are provided: [`MemorySessionStore`] lives as long as the
//! process, and [`FileSessionStore`] persists to a JSON file so a CLI login
//! survives between invocations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::SecretString;
use thiserror::Error;
use tomato_mall_core::{AccountId, Role};
use tracing::{debug, warn};

/// Keys the session is stored under.
pub mod keys {
    /// Bearer token.
    pub const TOKEN: &str = "token";
    /// Account role.
    pub const ROLE: &str = "role";
    /// Account id.
    pub const ACCOUNT_ID: &str = "id";
}

/// Errors from a session store backend.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value store scoped to one client lifecycle.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionError>;

    /// Remove every value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

type Entries = BTreeMap<String, String>;

// Lock poisoning only means another thread panicked mid-update of a plain
// map; the map itself is still usable.
fn read_lock(lock: &RwLock<Entries>) -> RwLockReadGuard<'_, Entries> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn write_lock(lock: &RwLock<Entries>) -> RwLockWriteGuard<'_, Entries> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// =============================================================================
// In-memory store
// =============================================================================

/// Session store held in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<Entries>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(read_lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        write_lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        write_lock(&self.entries).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        write_lock(&self.entries).clear();
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Session store persisted as a flat JSON object.
///
/// Entries are cached in memory; every change rewrites the whole file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Entries::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SessionError::Format {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened session file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> Result<(), SessionError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                }),
            };
        }
        let json = serde_json::to_vec_pretty(entries).map_err(|source| SessionError::Format {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(read_lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = write_lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = write_lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = write_lock(&self.entries);
        entries.clear();
        self.persist(&entries)
    }
}

// =============================================================================
// Typed facade
// =============================================================================

/// Typed view over a [`SessionStore`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Session {
    /// Wrap an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemorySessionStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Stored bearer token. An empty token counts as none.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self
            .store
            .get(keys::TOKEN)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// Stored role. Unrecognized values are logged and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn role(&self) -> Result<Option<Role>, SessionError> {
        let Some(raw) = self.store.get(keys::ROLE)? else {
            return Ok(None);
        };
        match raw.parse::<Role>() {
            Ok(role) => Ok(Some(role)),
            Err(e) => {
                warn!(error = %e, "Ignoring unrecognized stored role");
                Ok(None)
            }
        }
    }

    /// Stored account id. Unparseable values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn account_id(&self) -> Result<Option<AccountId>, SessionError> {
        Ok(self
            .store
            .get(keys::ACCOUNT_ID)?
            .and_then(|raw| raw.parse::<AccountId>().ok()))
    }

    /// Store only the token (the first half of a login).
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(keys::TOKEN, token)
    }

    /// Store a complete session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn establish(&self, token: &str, role: Role, id: AccountId) -> Result<(), SessionError> {
        self.store.set(keys::TOKEN, token)?;
        self.store.set(keys::ROLE, role.as_str())?;
        self.store.set(keys::ACCOUNT_ID, &id.to_string())
    }

    /// Forget all session state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear()
    }

    /// Whether a non-empty token is stored. Read failures count as logged out.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc123").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_session_establish_and_read_back() {
        let session = Session::in_memory();
        assert!(!session.is_logged_in());

        session
            .establish("abc123", Role::Shopkeeper, AccountId::new(7))
            .unwrap();

        assert!(session.is_logged_in());
        assert_eq!(session.token().unwrap().unwrap().expose_secret(), "abc123");
        assert_eq!(session.role().unwrap(), Some(Role::Shopkeeper));
        assert_eq!(session.account_id().unwrap(), Some(AccountId::new(7)));
        assert_eq!(session.store().get(keys::ROLE).unwrap().as_deref(), Some("SHOPKEEPER"));

        session.clear().unwrap();
        assert!(!session.is_logged_in());
        assert_eq!(session.role().unwrap(), None);
        assert_eq!(session.account_id().unwrap(), None);
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let session = Session::in_memory();
        session.set_token("").unwrap();
        assert!(session.token().unwrap().is_none());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_garbage_role_and_id_are_ignored() {
        let session = Session::in_memory();
        session.store().set(keys::ROLE, "SUPERUSER").unwrap();
        session.store().set(keys::ACCOUNT_ID, "seven").unwrap();
        assert_eq!(session.role().unwrap(), None);
        assert_eq!(session.account_id().unwrap(), None);
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let session = Session::in_memory();
        session.set_token("super-secret").unwrap();
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("logged_in: true"));
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = FileSessionStore::open(&path).unwrap();
            store.set(keys::TOKEN, "tok").unwrap();
            store.set(keys::ROLE, "admin").unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("tok"));
        assert_eq!(reopened.get(keys::ROLE).unwrap().as_deref(), Some("admin"));

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FileSessionStore::open(&path).unwrap_err();
        assert!(matches!(err, SessionError::Format { .. }));
    }
}
