//! Error types for drone-secrets-sync.

use std::fmt;

use thiserror::Error;

use drone_secrets_core::{CoreError, SecretName};

use crate::store::StoreError;

/// The store mutation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreAction::Create => write!(f, "create"),
            StoreAction::Update => write!(f, "update"),
            StoreAction::Delete => write!(f, "delete"),
        }
    }
}

/// All errors that can arise while synchronising a secret.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The store listing failed.
    #[error("failed to list secrets: {0}")]
    List(#[source] StoreError),

    /// A store mutation failed. The underlying store error is kept as the
    /// source, unchanged.
    #[error("failed to {action} secret {name}: {source}")]
    Store {
        action: StoreAction,
        name: SecretName,
        #[source]
        source: StoreError,
    },

    /// The marker name could not be derived.
    #[error("marker error: {0}")]
    Marker(#[from] CoreError),
}

impl SyncError {
    /// The store error behind this failure, if it came from the store.
    pub fn store_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            SyncError::List(source) | SyncError::Store { source, .. } => Some(source.as_ref()),
            SyncError::Marker(_) => None,
        }
    }
}

/// Convenience constructor for [`SyncError::Store`].
pub(crate) fn store_err(action: StoreAction, name: &str, source: StoreError) -> SyncError {
    SyncError::Store {
        action,
        name: name.to_owned(),
        source,
    }
}

/// A batch stopped at its first failing secret.
///
/// Mutations already applied are not rolled back; `updated` lists the secrets
/// that were fully synchronised before the failure.
#[derive(Debug, Error)]
#[error("sync stopped after {} updated secret(s): {source}", .updated.len())]
pub struct BatchError {
    pub updated: Vec<SecretName>,
    #[source]
    pub source: SyncError,
}
