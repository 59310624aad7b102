//! [`SecretStore`] scoped to one organisation namespace.

use drone_secrets_sync::{SecretStore, StoreError};

use crate::client::{OrganisationClient, RemoteSecret};

#[derive(Debug)]
pub struct OrganisationSecrets<C> {
    client: C,
    namespace: String,
}

impl<C: OrganisationClient> OrganisationSecrets<C> {
    pub fn new(client: C, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn payload(&self, name: &str, value: &str) -> RemoteSecret {
        RemoteSecret {
            namespace: Some(self.namespace.clone()),
            ..RemoteSecret::new(name, value)
        }
    }
}

impl<C: OrganisationClient> SecretStore for OrganisationSecrets<C> {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        tracing::debug!("listing secrets for organisation: {}", self.namespace);
        let secrets = self.client.org_secret_list(&self.namespace)?;
        Ok(secrets.into_iter().map(|s| s.name).collect())
    }

    fn create(&self, name: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!("creating secret in organisation: {}:{name}", self.namespace);
        self.client
            .org_secret_create(&self.namespace, &self.payload(name, value))?;
        Ok(())
    }

    fn update(&self, name: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!("updating secret in organisation: {}:{name}", self.namespace);
        self.client
            .org_secret_update(&self.namespace, &self.payload(name, value))?;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        tracing::debug!("deleting secret in organisation: {}:{name}", self.namespace);
        self.client.org_secret_delete(&self.namespace, name)?;
        Ok(())
    }
}
