//! The write-only secret store capability.
//!
//! Adapters for a concrete scope (one repository, one organisation, …)
//! implement [`SecretStore`]; the engine and manager depend on nothing else.

use std::error::Error;

/// Error reported by a store adapter, passed through the engine untouched.
pub type StoreError = Box<dyn Error + Send + Sync + 'static>;

/// A remote key-value store that never returns stored values.
///
/// Every call blocks the calling thread. Timeouts and retries, if any, are
/// the adapter's business.
pub trait SecretStore {
    /// Names of every entry in the store.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError>;

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError>;

    fn delete(&self, name: &str) -> Result<(), StoreError>;
}

impl<T: SecretStore + ?Sized> SecretStore for &T {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        (**self).list()
    }

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError> {
        (**self).create(name, value)
    }

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError> {
        (**self).update(name, value)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        (**self).delete(name)
    }
}

impl<T: SecretStore + ?Sized> SecretStore for Box<T> {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        (**self).list()
    }

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError> {
        (**self).create(name, value)
    }

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError> {
        (**self).update(name, value)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        (**self).delete(name)
    }
}
