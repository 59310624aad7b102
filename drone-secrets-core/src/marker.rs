//! Marker name derivation.
//!
//! A marker is a companion store entry whose *name* encodes a hash of the
//! paired secret's value:
//!
//! ```text
//! <name>___<hex(argon2id(value, salt = sha256(name)))>
//! ```
//!
//! The salt depends only on the name, so the marker can be recomputed from
//! the name/value pair without storing anything else. Argon2id keeps short or
//! guessable values expensive to brute-force from a leaked marker name.

use std::time::Instant;

use argon2::{Algorithm, Argon2, Version};
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::{marker_prefix, HashConfig};

/// Derive the marker name for `name` holding `value`.
///
/// Deterministic for identical inputs. Prefer [`DesiredSecret::marker_name`],
/// which caches the result.
///
/// [`DesiredSecret::marker_name`]: crate::types::DesiredSecret::marker_name
pub fn derive_marker_name(
    name: &str,
    value: &str,
    hash_config: &HashConfig,
) -> Result<String, CoreError> {
    let salt = Sha256::digest(name.as_bytes());
    let params = hash_config.params().map_err(CoreError::InvalidHashConfig)?;
    let mut output = vec![0u8; hash_config.output_length() as usize];

    let started = Instant::now();
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(value.as_bytes(), &salt, &mut output)
        .map_err(CoreError::Hash)?;
    tracing::debug!("marker hash for {name} created in {:?}", started.elapsed());

    Ok(format!("{}{}", marker_prefix(name), hex::encode(output)))
}
