//! Session-state store holding the persisted credential flag.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard reads the `token` key on every transition and
//! [`crate::net::auth::AuthSession`] writes and clears it. Stores are always
//! passed in explicitly (`&dyn SessionStore` or `Arc<S>`), never reached
//! through a global.
//!
//! TRADE-OFFS
//! ==========
//! There is no transaction discipline: concurrent writers overwrite each
//! other and the last write wins. The file store rewrites the whole JSON
//! object on every mutation.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key holding the access token whose presence means "authenticated".
pub const TOKEN_KEY: &str = "token";
/// Key holding the refresh token written by `AuthSession::sign_in`.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session store is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Synchronous key-value store for session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self, key: &str) -> Result<(), SessionError>;
}

/// Read the credential flag. An empty stored value counts as absent.
pub fn credential<S: SessionStore + ?Sized>(store: &S) -> Option<String> {
    store.get(TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Whether a credential flag is present.
pub fn is_authenticated<S: SessionStore + ?Sized>(store: &S) -> bool {
    credential(store).is_some()
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a credential flag.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        write_entries(&store.entries).insert(TOKEN_KEY.to_owned(), token.to_owned());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        read_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        write_entries(&self.entries).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SessionError> {
        write_entries(&self.entries).remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Store persisted as a flat JSON object of strings on disk.
///
/// The file is read once on open and replaced on every `set`/`clear` by
/// writing `<file>.tmp` and renaming it into place.
/// A missing file is an empty store; parent directories are created on the
/// first write.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or does not
    /// contain a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| SessionError::Io { path: parent.to_path_buf(), source })?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        // Staged write then rename: the store file is always a complete object.
        let staging = self.staging_path();
        std::fs::write(&staging, raw).map_err(|source| SessionError::Io { path: staging.clone(), source })?;
        std::fs::rename(&staging, &self.path).map_err(|source| SessionError::Io { path: self.path.clone(), source })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        read_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = write_entries(&self.entries);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn clear(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = write_entries(&self.entries);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

// A poisoned lock only means another writer panicked mid-insert; the map
// itself is still a valid map.
fn read_entries(lock: &RwLock<BTreeMap<String, String>>) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, String>> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn write_entries(
    lock: &RwLock<BTreeMap<String, String>>,
) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, String>> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}
