pub mod list;
pub mod sync;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use drone_secrets_client::{Credential, DroneClient, SecretScope};
use drone_secrets_core::HashConfig;
use drone_secrets_sync::{SecretManager, SecretStore};

/// Options shared by the sync commands.
#[derive(Args, Debug, Clone)]
pub struct SyncOptions {
    #[command(flatten)]
    pub hash: HashArgs,

    /// Report what would change without writing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Argon2id parameters for marker names.
///
/// Changing any of them invalidates every existing marker, so each secret is
/// resynced exactly once on the next run.
#[derive(Args, Debug, Clone)]
pub struct HashArgs {
    /// Argon2 iterations (time cost).
    #[arg(
        short = 'i',
        long = "argon2-iterations",
        default_value_t = HashConfig::DEFAULT_ITERATIONS
    )]
    pub iterations: u32,

    /// Argon2 output length in bytes.
    #[arg(
        short = 'l',
        long = "argon2-length",
        default_value_t = HashConfig::DEFAULT_OUTPUT_LENGTH
    )]
    pub length: u32,

    /// Argon2 memory cost in KiB.
    #[arg(
        short = 'm',
        long = "argon2-memory",
        default_value_t = HashConfig::DEFAULT_MEMORY_COST
    )]
    pub memory: u32,

    /// Argon2 degree of parallelism.
    #[arg(
        short = 'p',
        long = "argon2-parallelism",
        default_value_t = HashConfig::DEFAULT_PARALLELISM
    )]
    pub parallelism: u32,
}

impl HashArgs {
    pub fn to_config(&self) -> Result<HashConfig> {
        Ok(HashConfig::new(
            self.iterations,
            self.memory,
            self.parallelism,
            self.length,
        )?)
    }
}

/// Connect to the Drone server named in the environment, scoped to `scope`.
pub fn open_manager(scope: &SecretScope) -> Result<SecretManager<Box<dyn SecretStore>>> {
    let credential = Credential::from_env().context("Drone credentials are not configured")?;
    tracing::debug!("using Drone server: {}", credential.server);
    let client = DroneClient::new(credential).context("failed to configure Drone client")?;
    Ok(SecretManager::new(scope.open(client)))
}

/// Print `items` as a single-line JSON array on stdout.
pub fn print_json<T: Serialize>(items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items).context("failed to serialise output")?;
    println!("{json}");
    Ok(())
}

/// Clap value parser for organisation namespaces.
pub fn parse_namespace(input: &str) -> std::result::Result<String, String> {
    if input.is_empty() || input.contains('/') {
        return Err(format!(
            "namespace must be non-empty and contain no '/', got '{input}'"
        ));
    }
    Ok(input.to_owned())
}
