//! # drone-secrets-client
//!
//! Drone CI implementations of [`drone_secrets_sync::SecretStore`]:
//! [`RepositorySecrets`] for one repository and [`OrganisationSecrets`] for
//! a whole namespace, both over the blocking [`DroneClient`].

pub mod client;
pub mod credential;
pub mod error;
pub mod organisation;
pub mod repository;
pub mod scope;

pub use client::{DroneClient, OrganisationClient, RemoteSecret, RepositoryClient};
pub use credential::Credential;
pub use error::ClientError;
pub use organisation::OrganisationSecrets;
pub use repository::RepositorySecrets;
pub use scope::SecretScope;
