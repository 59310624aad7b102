//! `drone-secrets-sync repository|organisation`: converge a store to the
//! secrets in a JSON document.

use anyhow::{Context, Result};
use clap::Args;

use drone_secrets_client::SecretScope;
use drone_secrets_core::{input, RepositoryRef};

use super::{open_manager, parse_namespace, print_json, SyncOptions};

/// Arguments for `drone-secrets-sync repository`.
#[derive(Args, Debug)]
pub struct RepositoryArgs {
    /// Repository to sync, as `<owner>/<name>`.
    #[arg(value_name = "OWNER/NAME")]
    pub repository: RepositoryRef,

    /// JSON object of secret names to values; `-` reads stdin.
    #[arg(default_value = input::STDIN_SOURCE)]
    pub secrets_file: String,

    #[command(flatten)]
    pub options: SyncOptions,
}

impl RepositoryArgs {
    pub fn run(self) -> Result<()> {
        sync(SecretScope::Repository(self.repository), &self.secrets_file, &self.options)
    }
}

/// Arguments for `drone-secrets-sync organisation`.
#[derive(Args, Debug)]
pub struct OrganisationArgs {
    /// Organisation namespace to sync.
    #[arg(value_parser = parse_namespace)]
    pub namespace: String,

    /// JSON object of secret names to values; `-` reads stdin.
    #[arg(default_value = input::STDIN_SOURCE)]
    pub secrets_file: String,

    #[command(flatten)]
    pub options: SyncOptions,
}

impl OrganisationArgs {
    pub fn run(self) -> Result<()> {
        sync(SecretScope::Organisation(self.namespace), &self.secrets_file, &self.options)
    }
}

/// Input is validated in full before the server is contacted. On failure the
/// names updated so far are still printed.
fn sync(scope: SecretScope, source: &str, options: &SyncOptions) -> Result<()> {
    let hash_config = options.hash.to_config()?;
    let dry_run = options.dry_run;
    let secrets = input::read_secrets(source, &hash_config)
        .with_context(|| format!("failed to read secrets from '{source}'"))?;
    let manager = open_manager(&scope)?;

    tracing::debug!("syncing {} secret(s) into {scope}", secrets.len());
    match manager.sync_secrets(&secrets, dry_run) {
        Ok(updated) => {
            if dry_run {
                tracing::info!("[dry-run] {} secret(s) would be updated", updated.len());
            }
            print_json(&updated)
        }
        Err(err) => {
            print_json(&err.updated)?;
            Err(err).with_context(|| format!("sync failed for {scope}"))
        }
    }
}
