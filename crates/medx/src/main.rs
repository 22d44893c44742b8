// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! medx - operator CLI for MedXplore portal credentials.
//!
//! Wraps the credential vault so support staff can hash and check
//! passwords, mint session tokens, and read obfuscated emails from the
//! account store without going through the portal.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use medx_config::MedxConfig;

/// medx - MedXplore credential tooling.
#[derive(Parser, Debug)]
#[command(name = "medx", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hash a password (read from MEDX_PASSWORD or a prompt).
    HashPassword {
        /// Reuse this hex salt instead of generating one.
        #[arg(long)]
        salt: Option<String>,
    },
    /// Check a password against a stored hash and salt.
    VerifyPassword {
        #[arg(long)]
        hash: String,
        #[arg(long)]
        salt: String,
    },
    /// Generate a session token and its expiry.
    Token,
    /// Report whether an epoch-millisecond expiry has passed.
    CheckExpiry { expiry: i64 },
    /// Obfuscate an email for storage.
    ObfuscateEmail { email: String },
    /// Recover an email from its stored token.
    RevealEmail { token: String },
    /// Evaluate department access for a set of held identities.
    Authorize {
        /// Department being opened.
        #[arg(long)]
        department: String,
        /// Passport number of a signed-in student.
        #[arg(long)]
        student: Option<String>,
        /// Departments of a signed-in worker (repeatable; `all` is the wildcard).
        #[arg(long = "worker-department")]
        worker_departments: Vec<String>,
        /// The signed-in worker is an administrator.
        #[arg(long)]
        admin: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => medx_config::load_and_validate_path(path),
        None => medx_config::load_and_validate(),
    };
    let config: MedxConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            medx_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    match commands::run(cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "medx={log_level},medx_vault={log_level},medx_auth={log_level},warn"
            ))
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_authorize_flags() {
        let cli = Cli::try_parse_from([
            "medx",
            "authorize",
            "--department",
            "research",
            "--worker-department",
            "academic",
            "--worker-department",
            "all",
        ])
        .unwrap();
        match cli.command {
            Commands::Authorize {
                department,
                worker_departments,
                admin,
                student,
            } => {
                assert_eq!(department, "research");
                assert_eq!(worker_departments, vec!["academic", "all"]);
                assert!(!admin);
                assert!(student.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["medx", "token", "--config", "/tmp/medx.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/medx.toml")));
    }
}
