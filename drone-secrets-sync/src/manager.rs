//! Batch orchestration and listing queries over one [`SecretStore`].

use std::collections::BTreeSet;

use drone_secrets_core::{DesiredSecret, MaskedSecret, SecretName};

use crate::engine;
use crate::error::{BatchError, SyncError};
use crate::prefix_index::PrefixIndex;
use crate::store::SecretStore;

/// Synchronises desired secrets into a store.
///
/// Every public method starts from a fresh listing; nothing is remembered
/// between calls.
#[derive(Debug)]
pub struct SecretManager<S> {
    store: S,
}

impl<S: SecretStore> SecretManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every entry in the store, markers included.
    pub fn list_secrets(&self) -> Result<Vec<MaskedSecret>, SyncError> {
        let names = self.store.list().map_err(SyncError::List)?;
        Ok(names.into_iter().map(MaskedSecret::new).collect())
    }

    /// Secrets that have at least one marker entry, in name order.
    ///
    /// Marker entries themselves are not reported.
    pub fn list_synced_secrets(&self) -> Result<Vec<MaskedSecret>, SyncError> {
        let index = self.snapshot()?;
        let mut considered = BTreeSet::new();
        let mut managed = Vec::new();
        // Names sort before their markers, so an owner is always visited
        // before the markers it claims.
        for name in index.names() {
            if considered.contains(&name) {
                continue;
            }
            let secret = MaskedSecret::new(name);
            let markers = index.find_by_prefix(&secret.marker_prefix());
            if !markers.is_empty() {
                considered.extend(markers);
                managed.push(secret);
            }
        }
        Ok(managed)
    }

    /// Synchronise a single secret against a fresh listing.
    pub fn sync_secret(&self, secret: &DesiredSecret, dry_run: bool) -> Result<bool, SyncError> {
        let index = self.snapshot()?;
        engine::sync_secret(&self.store, secret, &index, dry_run)
    }

    /// Synchronise `secrets` in order against one shared listing.
    ///
    /// Returns the names of the secrets that were updated. Stops at the first
    /// failure; the error carries the names updated before it.
    pub fn sync_secrets(
        &self,
        secrets: &[DesiredSecret],
        dry_run: bool,
    ) -> Result<Vec<SecretName>, BatchError> {
        if secrets.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated = Vec::new();
        let index = match self.snapshot() {
            Ok(index) => index,
            Err(source) => return Err(BatchError { updated, source }),
        };

        for secret in secrets {
            match engine::sync_secret(&self.store, secret, &index, dry_run) {
                Ok(true) => updated.push(secret.name().to_owned()),
                Ok(false) => {}
                Err(source) => return Err(BatchError { updated, source }),
            }
        }
        Ok(updated)
    }

    fn snapshot(&self) -> Result<PrefixIndex, SyncError> {
        let names = self.store.list().map_err(SyncError::List)?;
        tracing::debug!("indexed {} existing secret(s)", names.len());
        Ok(PrefixIndex::build(names))
    }
}
