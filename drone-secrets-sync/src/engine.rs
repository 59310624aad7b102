//! Per-secret synchronisation against a write-only store.
//!
//! ## Decision procedure
//!
//! 1. Derive the marker name for the desired value.
//! 2. Marker indexed → already synchronised, no calls.
//! 3. Dry run → report an update, no calls.
//! 4. Create the plain entry if absent, otherwise update it.
//! 5. Delete every existing marker under `<name>___`.
//! 6. Create the new marker with a placeholder value.
//!
//! Stale markers are deleted before the new marker is created. A failure at
//! any step returns immediately; re-running recomputes everything from a
//! fresh listing, so a partially applied sync converges on the next run.

use drone_secrets_core::{DesiredSecret, MARKER_PLACEHOLDER};

use crate::error::{store_err, StoreAction, SyncError};
use crate::prefix_index::PrefixIndex;
use crate::store::SecretStore;

/// Converge one secret. Returns `true` if the secret was (or, in a dry run,
/// would be) written.
///
/// `index` must be a snapshot of `store` taken in this batch. An `Err` is
/// only possible once an action is required, so it always means the secret
/// was out of date.
pub fn sync_secret<S: SecretStore + ?Sized>(
    store: &S,
    secret: &DesiredSecret,
    index: &PrefixIndex,
    dry_run: bool,
) -> Result<bool, SyncError> {
    let name = secret.name();
    let marker = secret.marker_name()?;

    if index.exists(marker) {
        tracing::debug!("secret {name} is up to date");
        return Ok(false);
    }

    if dry_run {
        tracing::info!("[dry-run] would sync secret: {name}");
        return Ok(true);
    }

    if index.exists(name) {
        tracing::info!("updating secret: {name}");
        store
            .update(name, secret.value())
            .map_err(|e| store_err(StoreAction::Update, name, e))?;
    } else {
        tracing::info!("adding secret: {name}");
        store
            .create(name, secret.value())
            .map_err(|e| store_err(StoreAction::Create, name, e))?;
    }

    for stale in index.find_by_prefix(&secret.marker_prefix()) {
        tracing::info!("deleting old marker: {stale}");
        store
            .delete(&stale)
            .map_err(|e| store_err(StoreAction::Delete, &stale, e))?;
    }

    tracing::info!("adding marker: {marker}");
    store
        .create(marker, MARKER_PLACEHOLDER)
        .map_err(|e| store_err(StoreAction::Create, marker, e))?;

    Ok(true)
}
