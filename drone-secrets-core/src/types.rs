//! Domain types for secrets synchronisation.
//!
//! A secret is either *masked* (observed in the remote store, value unknown)
//! or *desired* (supplied by the caller, value known). Only desired secrets
//! can derive a marker name.

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::marker;

/// Name of a secret entry in the remote store.
pub type SecretName = String;

/// Separates a secret name from the hash suffix of its marker entry.
pub const MARKER_DELIMITER: &str = "___";

/// Value written to every marker entry. The store rejects empty values and
/// the marker's value is never read.
pub const MARKER_PLACEHOLDER: &str = "1";

// ---------------------------------------------------------------------------
// MaskedSecret
// ---------------------------------------------------------------------------

/// A secret whose value is unknown, as returned by a store listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskedSecret {
    pub name: SecretName,
}

impl MaskedSecret {
    pub fn new(name: impl Into<SecretName>) -> Self {
        Self { name: name.into() }
    }

    /// Prefix shared by every marker entry of this secret.
    ///
    /// The full marker name is only known once the value is known.
    pub fn marker_prefix(&self) -> String {
        marker_prefix(&self.name)
    }
}

impl fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl From<&str> for MaskedSecret {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MaskedSecret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// `name + MARKER_DELIMITER`.
pub fn marker_prefix(name: &str) -> String {
    format!("{name}{MARKER_DELIMITER}")
}

// ---------------------------------------------------------------------------
// HashConfig
// ---------------------------------------------------------------------------

/// Argon2id parameters used to derive marker names.
///
/// Values are validated on construction, so a `HashConfig` always describes
/// parameters Argon2 accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashConfig {
    iterations: u32,
    memory_cost: u32,
    parallelism: u32,
    output_length: u32,
}

impl HashConfig {
    pub const DEFAULT_ITERATIONS: u32 = 32;
    /// KiB.
    pub const DEFAULT_MEMORY_COST: u32 = 64 * 1024;
    pub const DEFAULT_PARALLELISM: u32 = 4;
    /// Bytes of hash output; the marker suffix is twice this many hex chars.
    pub const DEFAULT_OUTPUT_LENGTH: u32 = 32;

    pub fn new(
        iterations: u32,
        memory_cost: u32,
        parallelism: u32,
        output_length: u32,
    ) -> Result<Self, CoreError> {
        let config = Self {
            iterations,
            memory_cost,
            parallelism,
            output_length,
        };
        config.params().map_err(CoreError::InvalidHashConfig)?;
        Ok(config)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn output_length(&self) -> u32 {
        self.output_length
    }

    pub(crate) fn params(&self) -> Result<argon2::Params, argon2::Error> {
        argon2::Params::new(
            self.memory_cost,
            self.iterations,
            self.parallelism,
            Some(self.output_length as usize),
        )
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            memory_cost: Self::DEFAULT_MEMORY_COST,
            parallelism: Self::DEFAULT_PARALLELISM,
            output_length: Self::DEFAULT_OUTPUT_LENGTH,
        }
    }
}

// ---------------------------------------------------------------------------
// DesiredSecret
// ---------------------------------------------------------------------------

/// A secret whose value is known: the state the store should converge to.
///
/// The marker name is derived lazily and cached on the instance, since the
/// derivation is deliberately expensive.
#[derive(Clone)]
pub struct DesiredSecret {
    name: SecretName,
    value: String,
    hash_config: HashConfig,
    marker: OnceCell<String>,
}

impl DesiredSecret {
    pub fn new(name: impl Into<SecretName>, value: impl Into<String>, hash_config: HashConfig) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hash_config,
            marker: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    pub fn marker_prefix(&self) -> String {
        marker_prefix(&self.name)
    }

    /// Name of the marker entry matching this secret's current value.
    pub fn marker_name(&self) -> Result<&str, CoreError> {
        if let Some(marker) = self.marker.get() {
            return Ok(marker);
        }
        let derived = marker::derive_marker_name(&self.name, &self.value, &self.hash_config)?;
        Ok(self.marker.get_or_init(|| derived))
    }

    pub fn to_masked(&self) -> MaskedSecret {
        MaskedSecret::new(self.name.clone())
    }
}

impl fmt::Debug for DesiredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesiredSecret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("hash_config", &self.hash_config)
            .field("marker", &self.marker.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RepositoryRef
// ---------------------------------------------------------------------------

/// A repository in `<namespace>/<name>` form, e.g. `octocat/hello-world`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub namespace: String,
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidRepository {
            input: s.to_owned(),
        };
        let (namespace, name) = s.split_once('/').ok_or_else(invalid)?;
        if namespace.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
