//! Error types for drone-secrets-client.

use thiserror::Error;

/// All errors that can arise from talking to a Drone server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required environment variable is missing or empty.
    #[error("{variable} environment variable must be set and non-empty")]
    Credential { variable: &'static str },

    /// `DRONE_SERVER` is not an absolute http(s) URL.
    #[error("invalid Drone server URL '{server}': {reason}")]
    InvalidServer { server: String, reason: String },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never got a response (DNS, connect, TLS, timeout, …).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
