//! Desired-state input: a flat JSON object of secret name to value.
//!
//! ```json
//! { "API_KEY": "abc", "DB_PASSWORD": "hunter2" }
//! ```

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{io_err, CoreError};
use crate::types::{DesiredSecret, HashConfig, MARKER_DELIMITER};

/// Source name meaning "read from standard input".
pub const STDIN_SOURCE: &str = "-";

/// Parse a JSON object into desired secrets, ordered by name.
pub fn parse_secrets(json: &str, hash_config: &HashConfig) -> Result<Vec<DesiredSecret>, CoreError> {
    let Value::Object(entries) = serde_json::from_str::<Value>(json)? else {
        return Err(CoreError::NotAnObject);
    };

    let mut secrets = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        if name.is_empty() {
            return Err(CoreError::EmptySecretName);
        }
        let Value::String(value) = value else {
            return Err(CoreError::NonStringValue { name });
        };
        if name.contains(MARKER_DELIMITER) {
            tracing::warn!(
                "secret name {name} contains the marker delimiter '{MARKER_DELIMITER}'; \
                 it may be mistaken for a marker of another secret"
            );
        }
        secrets.push(DesiredSecret::new(name, value, *hash_config));
    }
    Ok(secrets)
}

/// Read and parse desired secrets from a file, or stdin when `source` is `-`.
pub fn read_secrets(source: &str, hash_config: &HashConfig) -> Result<Vec<DesiredSecret>, CoreError> {
    let contents = if source == STDIN_SOURCE {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| io_err("<stdin>", e))?;
        buf
    } else {
        let path = Path::new(source);
        std::fs::read_to_string(path).map_err(|e| io_err(path, e))?
    };
    parse_secrets(&contents, hash_config)
}
