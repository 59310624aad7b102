//! drone-secrets-core: domain types, marker derivation and input parsing.
//!
//! - [`types`]: [`DesiredSecret`], [`MaskedSecret`], [`HashConfig`], [`RepositoryRef`]
//! - [`marker`]: content-addressed marker names
//! - [`input`]: desired state from a JSON object
//! - [`error`]: [`CoreError`]

pub mod error;
pub mod input;
pub mod marker;
pub mod types;

pub use error::CoreError;
pub use marker::derive_marker_name;
pub use types::{
    marker_prefix, DesiredSecret, HashConfig, MaskedSecret, RepositoryRef, SecretName,
    MARKER_DELIMITER, MARKER_PLACEHOLDER,
};
