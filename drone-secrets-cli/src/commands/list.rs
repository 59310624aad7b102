//! `drone-secrets-sync list`: show what a store holds.

use anyhow::{Context, Result};
use clap::Subcommand;

use drone_secrets_client::SecretScope;
use drone_secrets_core::RepositoryRef;

use super::{open_manager, parse_namespace, print_json};

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List the secrets of a repository.
    Repository {
        #[arg(value_name = "OWNER/NAME")]
        repository: RepositoryRef,

        /// Only secrets managed by this tool, without their markers.
        #[arg(long)]
        synced: bool,
    },

    /// List the secrets of an organisation namespace.
    Organisation {
        #[arg(value_parser = parse_namespace)]
        namespace: String,

        /// Only secrets managed by this tool, without their markers.
        #[arg(long)]
        synced: bool,
    },
}

pub fn run(command: ListCommand) -> Result<()> {
    let (scope, synced) = match command {
        ListCommand::Repository { repository, synced } => {
            (SecretScope::Repository(repository), synced)
        }
        ListCommand::Organisation { namespace, synced } => {
            (SecretScope::Organisation(namespace), synced)
        }
    };

    let manager = open_manager(&scope)?;
    let listed = if synced {
        manager.list_synced_secrets()
    } else {
        manager.list_secrets()
    };
    let secrets = listed.with_context(|| format!("failed to list secrets for {scope}"))?;

    print_json(&secrets)
}
