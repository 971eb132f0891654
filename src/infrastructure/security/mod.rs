pub mod credentials;
pub mod keyring;

pub use self::credentials::CredentialCache;
pub use self::keyring::{KeyringSecretStore, SecretStore};
