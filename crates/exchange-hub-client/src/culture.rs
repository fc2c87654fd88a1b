//! Culture selection, persisted alongside the session.

use exchange_hub_common::culture::Culture;

use crate::{
    storage::{SessionStore, StorageKey},
    Error,
};

/// Reads and persists the user's chosen culture.
#[derive(Clone)]
pub struct CultureService {
    store: SessionStore,
}

impl CultureService {
    /// Create a service backed by `store`.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The currently selected culture, resolved through best-match.
    pub async fn current(&self) -> Result<Culture, Error> {
        let stored: Option<String> = self.store.get(StorageKey::Culture)?;
        Ok(Culture::best_match(stored.as_deref()))
    }

    /// Load the stored selection, persisting the default on first run.
    pub async fn load(&self) -> Result<Culture, Error> {
        match self.store.get::<String>(StorageKey::Culture)? {
            Some(tag) => Ok(Culture::best_match(Some(&tag))),
            None => {
                let culture = Culture::default();
                self.set(culture).await?;
                Ok(culture)
            }
        }
    }

    /// Persist `culture` as the selection.
    pub async fn set(&self, culture: Culture) -> Result<(), Error> {
        self.store.save(StorageKey::Culture, &culture.tag())
    }

    /// Lower-case two-letter ISO language code of the current culture.
    pub async fn language_code(&self) -> Result<&'static str, Error> {
        Ok(self.current().await?.language_code())
    }
}
