//! Drone credentials from the environment.

use std::fmt;

use crate::error::ClientError;

pub const DRONE_SERVER_VARIABLE: &str = "DRONE_SERVER";
pub const DRONE_TOKEN_VARIABLE: &str = "DRONE_TOKEN";

/// Server address and access token for a Drone instance.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub server: String,
    pub token: String,
}

impl Credential {
    pub fn new(server: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            token: token.into(),
        }
    }

    /// Read `DRONE_SERVER` and `DRONE_TOKEN`; both must be set and non-empty.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Credential::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let read = |variable: &'static str| {
            lookup(variable)
                .filter(|value| !value.is_empty())
                .ok_or(ClientError::Credential { variable })
        };
        Ok(Self {
            server: read(DRONE_SERVER_VARIABLE)?,
            token: read(DRONE_TOKEN_VARIABLE)?,
        })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("server", &self.server)
            .field("token", &"<redacted>")
            .finish()
    }
}
