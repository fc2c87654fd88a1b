//! Client-side session storage.
//!
//! The durable analog of browser local storage: a small set of named slots
//! holding JSON-encoded payloads, surviving process restarts when a
//! file-backed backend is used.

use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{error, Error};

/// Logical storage slots used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The serialized OAuth token response.
    OAuthTokens,
    /// The serialized user-info projection.
    UserInformation,
    /// The persisted UI culture tag.
    Culture,
}

impl StorageKey {
    /// Stable string name of the slot.
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::OAuthTokens => "oauth-tokens",
            StorageKey::UserInformation => "user-information",
            StorageKey::Culture => "culture",
        }
    }
}

/// A durable key/value backend holding JSON-encoded payloads.
///
/// Reading a missing key yields `Ok(None)`; it is never an error.
pub trait StorageBackend: Send + Sync {
    /// Read the payload stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` under `key`, replacing any previous payload.
    fn write(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove every given key. Missing keys are ignored.
    fn remove(&self, keys: &[&str]) -> Result<(), Error>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, keys: &[&str]) -> Result<(), Error> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

/// File-per-key backend rooted at a configured directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(error::storage)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(error::storage(err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        std::fs::write(self.path_for(key), value).map_err(error::storage)
    }

    fn remove(&self, keys: &[&str]) -> Result<(), Error> {
        for key in keys {
            match std::fs::remove_file(self.path_for(key)) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(error::storage(err)),
            }
        }
        Ok(())
    }
}

/// Typed view over a [StorageBackend].
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
}

impl SessionStore {
    /// Wrap the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Serialize `value` and store it under `key`.
    pub fn save<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), Error> {
        let payload = serde_json::to_string(value).map_err(error::storage)?;
        self.backend.write(key.name(), &payload)
    }

    /// Read and deserialize the value stored under `key`, if present.
    ///
    /// A corrupt payload surfaces as a storage error, not as absence.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, Error> {
        match self.backend.read(key.name())? {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(error::storage),
            None => Ok(None),
        }
    }

    /// Remove every given key.
    pub fn remove(&self, keys: &[StorageKey]) -> Result<(), Error> {
        let names: Vec<&str> = keys.iter().map(|key| key.name()).collect();
        self.backend.remove(&names)
    }
}
