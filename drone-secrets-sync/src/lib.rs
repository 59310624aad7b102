//! # drone-secrets-sync
//!
//! Marker-gated synchronisation of desired secrets into a write-only store.
//!
//! Implement [`SecretStore`] for a store scope, wrap it in a
//! [`SecretManager`], and call [`SecretManager::sync_secrets`].

pub mod engine;
pub mod error;
pub mod manager;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod prefix_index;
pub mod store;

pub use error::{BatchError, StoreAction, SyncError};
pub use manager::SecretManager;
pub use prefix_index::PrefixIndex;
pub use store::{SecretStore, StoreError};
