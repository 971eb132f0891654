use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::keyring::SecretStore;
use crate::domain::error::Result;

/// Lazily loaded, process-lifetime cache of the provider API key.
///
/// The store is only consulted while nothing is cached, so the OS keychain
/// prompt (if any) appears on first use rather than at launch.
pub struct CredentialCache {
    store: Arc<dyn SecretStore>,
    name: String,
    cached: RwLock<Option<Arc<str>>>,
}

impl CredentialCache {
    pub fn new(store: Arc<dyn SecretStore>, name: &str) -> Self {
        Self {
            store,
            name: name.to_string(),
            cached: RwLock::new(None),
        }
    }

    /// Returns the credential, fetching it from the store on first use.
    /// Empty values count as absent.
    pub fn get(&self) -> Option<Arc<str>> {
        if let Some(key) = self.read_cached() {
            return Some(key);
        }

        let loaded = match self.store.retrieve(&self.name) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "Failed to load API key from secret store");
                None
            }
        };

        let key: Arc<str> = Arc::from(loaded?.as_str());
        debug!("API key loaded from secret store");
        self.replace(Some(key.clone()));
        Some(key)
    }

    pub fn has_credential(&self) -> bool {
        self.get().is_some()
    }

    /// Persists a new credential and makes it the cached value.
    pub fn set(&self, key: &str) -> Result<()> {
        self.store.store(&self.name, key)?;
        self.replace(Some(Arc::from(key)));
        Ok(())
    }

    /// Deletes the stored credential and drops the cached copy.
    pub fn clear(&self) -> Result<()> {
        self.store.delete(&self.name)?;
        self.replace(None);
        Ok(())
    }

    /// Forces the next [`get`](Self::get) to go back to the store.
    pub fn invalidate(&self) {
        self.replace(None);
    }

    fn read_cached(&self) -> Option<Arc<str>> {
        match self.cached.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, value: Option<Arc<str>>) {
        match self.cached.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
