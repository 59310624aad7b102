//! Blocking client for the subset of the Drone secrets API we use.
//!
//! ```text
//! GET    /api/repos/{namespace}/{name}/secrets
//! POST   /api/repos/{namespace}/{name}/secrets
//! PATCH  /api/repos/{namespace}/{name}/secrets/{secret}
//! DELETE /api/repos/{namespace}/{name}/secrets/{secret}
//!
//! GET    /api/secrets/{namespace}
//! POST   /api/secrets/{namespace}
//! PATCH  /api/secrets/{namespace}/{secret}
//! DELETE /api/secrets/{namespace}/{secret}
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::credential::Credential;
use crate::error::ClientError;

/// Default connect + read timeout for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A secret as exchanged with the Drone API.
///
/// Listings never include `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSecret {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RemoteSecret {
    pub fn new(name: &str, data: &str) -> Self {
        Self {
            namespace: None,
            name: name.to_owned(),
            data: Some(data.to_owned()),
        }
    }
}

/// Repository-scoped secret operations.
pub trait RepositoryClient {
    fn repo_secret_list(&self, namespace: &str, name: &str) -> Result<Vec<RemoteSecret>, ClientError>;

    fn repo_secret_create(
        &self,
        namespace: &str,
        name: &str,
        secret: &RemoteSecret,
    ) -> Result<(), ClientError>;

    fn repo_secret_update(
        &self,
        namespace: &str,
        name: &str,
        secret: &RemoteSecret,
    ) -> Result<(), ClientError>;

    fn repo_secret_delete(&self, namespace: &str, name: &str, secret: &str) -> Result<(), ClientError>;
}

/// Organisation-scoped secret operations.
pub trait OrganisationClient {
    fn org_secret_list(&self, namespace: &str) -> Result<Vec<RemoteSecret>, ClientError>;

    fn org_secret_create(&self, namespace: &str, secret: &RemoteSecret) -> Result<(), ClientError>;

    fn org_secret_update(&self, namespace: &str, secret: &RemoteSecret) -> Result<(), ClientError>;

    fn org_secret_delete(&self, namespace: &str, secret: &str) -> Result<(), ClientError>;
}

/// HTTP client for one Drone server, authenticated with a bearer token.
pub struct DroneClient {
    agent: ureq::Agent,
    base: Url,
    token: String,
}

impl DroneClient {
    pub fn new(credential: Credential) -> Result<Self, ClientError> {
        Self::with_timeout(credential, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credential: Credential, timeout: Duration) -> Result<Self, ClientError> {
        let base = parse_server(&credential.server)?;
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("drone-secrets-sync/", env!("CARGO_PKG_VERSION")))
            .build();
        Ok(Self {
            agent,
            base,
            token: credential.token,
        })
    }

    /// Server base URL without a trailing slash.
    pub fn server(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// `base` with `segments` appended, each percent-encoded as one path
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Only fails for cannot-be-a-base URLs, which `parse_server` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn repo_secrets_url(&self, namespace: &str, name: &str) -> Url {
        self.endpoint(&["api", "repos", namespace, name, "secrets"])
    }

    fn repo_secret_url(&self, namespace: &str, name: &str, secret: &str) -> Url {
        self.endpoint(&["api", "repos", namespace, name, "secrets", secret])
    }

    fn org_secrets_url(&self, namespace: &str) -> Url {
        self.endpoint(&["api", "secrets", namespace])
    }

    fn org_secret_url(&self, namespace: &str, secret: &str) -> Url {
        self.endpoint(&["api", "secrets", namespace, secret])
    }

    fn list(&self, url: Url) -> Result<Vec<RemoteSecret>, ClientError> {
        let response = self.send("GET", &url, None)?;
        response.into_json().map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn send(
        &self,
        method: &'static str,
        url: &Url,
        body: Option<&RemoteSecret>,
    ) -> Result<ureq::Response, ClientError> {
        tracing::debug!("{method} {url}");
        let request = self
            .agent
            .request_url(method, url)
            .set("Authorization", &format!("Bearer {}", self.token));
        let result = match body {
            Some(secret) => request.send_json(secret),
            None => request.call(),
        };
        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => Err(ClientError::Status {
                method,
                url: url.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => Err(ClientError::Transport {
                method,
                url: url.to_string(),
                source: Box::new(transport),
            }),
        }
    }
}

fn parse_server(server: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidServer {
        server: server.to_owned(),
        reason,
    };
    let url = Url::parse(server).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid("expected an http or https URL".to_owned()));
    }
    Ok(url)
}

impl RepositoryClient for DroneClient {
    fn repo_secret_list(&self, namespace: &str, name: &str) -> Result<Vec<RemoteSecret>, ClientError> {
        self.list(self.repo_secrets_url(namespace, name))
    }

    fn repo_secret_create(
        &self,
        namespace: &str,
        name: &str,
        secret: &RemoteSecret,
    ) -> Result<(), ClientError> {
        self.send("POST", &self.repo_secrets_url(namespace, name), Some(secret))?;
        Ok(())
    }

    fn repo_secret_update(
        &self,
        namespace: &str,
        name: &str,
        secret: &RemoteSecret,
    ) -> Result<(), ClientError> {
        let url = self.repo_secret_url(namespace, name, &secret.name);
        self.send("PATCH", &url, Some(secret))?;
        Ok(())
    }

    fn repo_secret_delete(&self, namespace: &str, name: &str, secret: &str) -> Result<(), ClientError> {
        self.send("DELETE", &self.repo_secret_url(namespace, name, secret), None)?;
        Ok(())
    }
}

impl OrganisationClient for DroneClient {
    fn org_secret_list(&self, namespace: &str) -> Result<Vec<RemoteSecret>, ClientError> {
        self.list(self.org_secrets_url(namespace))
    }

    fn org_secret_create(&self, namespace: &str, secret: &RemoteSecret) -> Result<(), ClientError> {
        self.send("POST", &self.org_secrets_url(namespace), Some(secret))?;
        Ok(())
    }

    fn org_secret_update(&self, namespace: &str, secret: &RemoteSecret) -> Result<(), ClientError> {
        let url = self.org_secret_url(namespace, &secret.name);
        self.send("PATCH", &url, Some(secret))?;
        Ok(())
    }

    fn org_secret_delete(&self, namespace: &str, secret: &str) -> Result<(), ClientError> {
        self.send("DELETE", &self.org_secret_url(namespace, secret), None)?;
        Ok(())
    }
}

impl std::fmt::Debug for DroneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DroneClient")
            .field("server", &self.server())
            .finish_non_exhaustive()
    }
}
