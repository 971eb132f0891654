use crate::domain::error::{AppError, Result};
use keyring::Entry;

/// Named secret storage. Deleting a missing secret is not an error.
pub trait SecretStore: Send + Sync {
    fn store(&self, name: &str, value: &str) -> Result<()>;
    fn retrieve(&self, name: &str) -> Result<Option<String>>;
    fn delete(&self, name: &str) -> Result<()>;
}

/// [`SecretStore`] backed by the operating system credential store.
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, name: &str) -> Result<Entry> {
        Entry::new(&self.service, name)
            .map_err(|e| AppError::SecurityError(format!("Failed to create entry: {}", e)))
    }
}

impl SecretStore for KeyringSecretStore {
    fn store(&self, name: &str, value: &str) -> Result<()> {
        self.entry(name)?
            .set_password(value)
            .map_err(|e| AppError::SecurityError(format!("Failed to set password: {}", e)))
    }

    fn retrieve(&self, name: &str) -> Result<Option<String>> {
        match self.entry(name)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to get password: {}",
                e
            ))),
        }
    }

    fn delete(&self, name: &str) -> Result<()> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AppError::SecurityError(format!(
                "Failed to delete password: {}",
                e
            ))),
        }
    }
}
