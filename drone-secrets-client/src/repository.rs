//! [`SecretStore`] scoped to one repository.

use drone_secrets_core::RepositoryRef;
use drone_secrets_sync::{SecretStore, StoreError};

use crate::client::{RemoteSecret, RepositoryClient};

#[derive(Debug)]
pub struct RepositorySecrets<C> {
    client: C,
    repository: RepositoryRef,
}

impl<C: RepositoryClient> RepositorySecrets<C> {
    pub fn new(client: C, repository: RepositoryRef) -> Self {
        Self { client, repository }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }
}

impl<C: RepositoryClient> SecretStore for RepositorySecrets<C> {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        tracing::debug!("listing secrets for repository: {}", self.repository);
        let RepositoryRef { namespace, name } = &self.repository;
        let secrets = self.client.repo_secret_list(namespace, name)?;
        Ok(secrets.into_iter().map(|s| s.name).collect())
    }

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!("creating secret in repository: {}:{name}", self.repository);
        let repo = &self.repository;
        self.client
            .repo_secret_create(&repo.namespace, &repo.name, &RemoteSecret::new(name, value))?;
        Ok(())
    }

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!("updating secret in repository: {}:{name}", self.repository);
        let repo = &self.repository;
        self.client
            .repo_secret_update(&repo.namespace, &repo.name, &RemoteSecret::new(name, value))?;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        tracing::debug!("deleting secret in repository: {}:{name}", self.repository);
        let repo = &self.repository;
        self.client
            .repo_secret_delete(&repo.namespace, &repo.name, name)?;
        Ok(())
    }
}
