//! Error types for drone-secrets-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from building desired state.
///
/// Everything except [`CoreError::Hash`] is a configuration problem: it is
/// raised before any remote store is contacted.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Argon2 rejected the supplied hash parameters.
    #[error("invalid argon2 parameters: {0}")]
    InvalidHashConfig(#[source] argon2::Error),

    /// A secret in the input had an empty name.
    #[error("secret names must be non-empty")]
    EmptySecretName,

    /// A secret in the input mapped to something other than a JSON string.
    #[error("value of secret '{name}' must be a string")]
    NonStringValue { name: String },

    /// The input document was valid JSON but not an object.
    #[error("secrets input must be a JSON object mapping names to values")]
    NotAnObject,

    /// A repository reference was not of the form `<namespace>/<name>`.
    #[error("repository must be in the format <namespace>/<name>, got '{input}'")]
    InvalidRepository { input: String },

    /// The input document could not be parsed as JSON.
    #[error("failed to parse secrets JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the input document failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Argon2 failed while deriving a marker name.
    #[error("marker hash derivation failed: {0}")]
    Hash(#[source] argon2::Error),
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
