//! Store scope selection shared by every CLI command.

use std::fmt;

use drone_secrets_core::RepositoryRef;
use drone_secrets_sync::SecretStore;

use crate::client::{OrganisationClient, RepositoryClient};
use crate::organisation::OrganisationSecrets;
use crate::repository::RepositorySecrets;

/// Which set of Drone secrets a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretScope {
    /// Secrets of a single repository.
    Repository(RepositoryRef),
    /// Secrets shared by every repository in a namespace.
    Organisation(String),
}

impl SecretScope {
    /// Build the store adapter for this scope.
    pub fn open<C>(&self, client: C) -> Box<dyn SecretStore>
    where
        C: RepositoryClient + OrganisationClient + 'static,
    {
        match self {
            SecretScope::Repository(repository) => {
                Box::new(RepositorySecrets::new(client, repository.clone()))
            }
            SecretScope::Organisation(namespace) => {
                Box::new(OrganisationSecrets::new(client, namespace.clone()))
            }
        }
    }
}

impl fmt::Display for SecretScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretScope::Repository(repository) => write!(f, "repository {repository}"),
            SecretScope::Organisation(namespace) => write!(f, "organisation {namespace}"),
        }
    }
}
