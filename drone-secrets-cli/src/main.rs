//! drone-secrets-sync: keep Drone CI secrets in step with a JSON document.
//!
//! # Usage
//!
//! ```text
//! drone-secrets-sync repository <OWNER/NAME> [SECRETS_FILE] [SYNC OPTIONS]
//! drone-secrets-sync organisation <NAMESPACE> [SECRETS_FILE] [SYNC OPTIONS]
//! drone-secrets-sync list repository <OWNER/NAME> [--synced]
//! drone-secrets-sync list organisation <NAMESPACE> [--synced]
//! ```
//!
//! `DRONE_SERVER` and `DRONE_TOKEN` must be set. Secrets are read from
//! `SECRETS_FILE`, or stdin when it is omitted or `-`. Sync options are the
//! Argon2 parameters (`-i`, `-l`, `-m`, `-p`) and `-n/--dry-run`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    list::ListCommand,
    sync::{OrganisationArgs, RepositoryArgs},
};

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "DRONE_SECRETS_SYNC_LOG";

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "drone-secrets-sync",
    version,
    about = "Synchronise secrets into Drone CI repositories and organisations",
    long_about = None,
)]
struct Cli {
    /// Log request and hashing detail to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync secrets into a single repository.
    Repository(RepositoryArgs),

    /// Sync secrets shared by every repository in a namespace.
    Organisation(OrganisationArgs),

    /// List the secrets of a repository or organisation.
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Repository(args) => args.run(),
        Commands::Organisation(args) => args.run(),
        Commands::List { command } => commands::list::run(command),
    }
}

/// Logs go to stderr; stdout carries only JSON results.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sync_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "drone-secrets-sync",
            "repository",
            "octocat/hello-world",
            "-i",
            "3",
            "-m",
            "128",
            "-n",
        ])
        .unwrap();
        let Commands::Repository(args) = cli.command else {
            panic!("expected repository command");
        };
        assert_eq!(args.options.hash.iterations, 3);
        assert_eq!(args.options.hash.memory, 128);
        assert!(args.options.dry_run);
    }

    #[test]
    fn dry_run_defaults_off() {
        let cli = Cli::try_parse_from(["drone-secrets-sync", "organisation", "octocat"]).unwrap();
        let Commands::Organisation(args) = cli.command else {
            panic!("expected organisation command");
        };
        assert!(!args.options.dry_run);
    }

    #[test]
    fn list_rejects_sync_options() {
        for flag in ["--dry-run", "-n", "--argon2-iterations=3"] {
            let result =
                Cli::try_parse_from(["drone-secrets-sync", "list", "organisation", "octocat", flag]);
            assert!(result.is_err(), "list accepted {flag}");
        }
    }

    #[test]
    fn secrets_file_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["drone-secrets-sync", "organisation", "octocat"]).unwrap();
        let Commands::Organisation(args) = cli.command else {
            panic!("expected organisation command");
        };
        assert_eq!(args.secrets_file, "-");
    }

    #[test]
    fn malformed_repository_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["drone-secrets-sync", "repository", "no-slash"]).unwrap_err();
        assert!(err.to_string().contains("<namespace>/<name>"), "got: {err}");
    }

    #[test]
    fn list_synced_flag() {
        let cli = Cli::try_parse_from([
            "drone-secrets-sync",
            "list",
            "repository",
            "octocat/hello-world",
            "--synced",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                command: ListCommand::Repository { synced: true, .. }
            }
        ));
    }
}
