// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand handlers.

use std::io::Write;

use medx_auth::authorize_any;
use medx_config::MedxConfig;
use medx_core::{Department, Identity, MedxError};
use medx_vault::{CredentialVault, get_password};
use tracing::info;

use crate::Commands;

/// Runs a subcommand, writing to stdout. `Ok(false)` means the command
/// completed but reported a negative result (invalid password, denied access).
pub(crate) fn run(command: Commands, config: &MedxConfig) -> Result<bool, MedxError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(command, config, &mut out)
}

pub(crate) fn run_with(
    command: Commands,
    config: &MedxConfig,
    out: &mut dyn Write,
) -> Result<bool, MedxError> {
    let vault = CredentialVault::from_config(config)?;

    match command {
        Commands::HashPassword { salt } => {
            let password = get_password("Password")?;
            let hashed = vault.hash_password(&password, salt.as_deref())?;
            let json = serde_json::to_string_pretty(&hashed)
                .map_err(|e| MedxError::Internal(format!("failed to encode hash: {e}")))?;
            emit(out, &json)?;
            Ok(true)
        }
        Commands::VerifyPassword { hash, salt } => {
            let password = get_password("Password")?;
            let ok = vault.verify_password(&password, &hash, &salt)?;
            emit(out, if ok { "valid" } else { "invalid" })?;
            Ok(ok)
        }
        Commands::Token => {
            let issued = vault.issue_session()?;
            let json = serde_json::json!({
                "token": issued.token,
                "expiry": issued.expiry,
                "expires_at": format_millis(issued.expiry),
            });
            emit(out, &json.to_string())?;
            info!(expiry = issued.expiry, "token generated");
            Ok(true)
        }
        Commands::CheckExpiry { expiry } => {
            let expired = vault.is_token_expired(expiry);
            emit(out, if expired { "expired" } else { "active" })?;
            Ok(!expired)
        }
        Commands::ObfuscateEmail { email } => {
            emit(out, &vault.obfuscate_email(&email))?;
            Ok(true)
        }
        Commands::RevealEmail { token } => match vault.reveal_email(&token) {
            Some(email) => {
                emit(out, &email)?;
                Ok(true)
            }
            None => Err(MedxError::Decode(
                "token could not be decoded with the configured key".to_string(),
            )),
        },
        Commands::Authorize {
            department,
            student,
            worker_departments,
            admin,
        } => {
            let identities = held_identities(student, worker_departments, admin);
            let granted = authorize_any(&identities, &Department::new(department));
            emit(out, if granted { "granted" } else { "denied" })?;
            Ok(granted)
        }
    }
}

/// The identities a visitor holds, one per signed-in system.
fn held_identities(
    student: Option<String>,
    worker_departments: Vec<String>,
    admin: bool,
) -> Vec<Identity> {
    let mut identities = Vec::new();
    if let Some(passport_number) = student {
        identities.push(Identity::Student { passport_number });
    }
    if admin || !worker_departments.is_empty() {
        identities.push(Identity::Worker {
            departments: worker_departments.into_iter().map(Department::new).collect(),
            is_admin: admin,
        });
    }
    identities
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

fn emit(out: &mut dyn Write, line: &str) -> Result<(), MedxError> {
    writeln!(out, "{line}").map_err(|e| MedxError::Internal(format!("failed to write output: {e}")))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn run_capture(command: Commands) -> (Result<bool, MedxError>, String) {
        let mut buf = Vec::new();
        let result = run_with(command, &MedxConfig::default(), &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn obfuscate_then_reveal() {
        let (result, token) = run_capture(Commands::ObfuscateEmail {
            email: "staff@medxplore.org".to_string(),
        });
        assert!(result.unwrap());

        let (result, email) = run_capture(Commands::RevealEmail {
            token: token.trim().to_string(),
        });
        assert!(result.unwrap());
        assert_eq!(email.trim(), "staff@medxplore.org");
    }

    #[test]
    fn reveal_bad_token_is_decode_error() {
        let (result, output) = run_capture(Commands::RevealEmail {
            token: "not-valid-base64!!".to_string(),
        });
        assert!(matches!(result, Err(MedxError::Decode(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn token_output_shape() {
        let (result, output) = run_capture(Commands::Token);
        assert!(result.unwrap());
        let json: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(json["token"].as_str().unwrap().len(), 64);
        assert!(json["expiry"].as_i64().unwrap() > 0);
        assert!(json["expires_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn check_expiry_past_and_future() {
        let (result, output) = run_capture(Commands::CheckExpiry { expiry: 0 });
        assert!(!result.unwrap());
        assert_eq!(output.trim(), "expired");

        let (result, output) = run_capture(Commands::CheckExpiry { expiry: i64::MAX });
        assert!(result.unwrap());
        assert_eq!(output.trim(), "active");
    }

    #[test]
    fn authorize_or_gate() {
        let (_, output) = run_capture(Commands::Authorize {
            department: "research".to_string(),
            student: Some("MX-1".to_string()),
            worker_departments: vec!["academic".to_string()],
            admin: false,
        });
        assert_eq!(output.trim(), "denied");

        let (result, output) = run_capture(Commands::Authorize {
            department: "academic".to_string(),
            student: Some("MX-1".to_string()),
            worker_departments: vec!["academic".to_string()],
            admin: false,
        });
        assert!(result.unwrap());
        assert_eq!(output.trim(), "granted");

        let (_, output) = run_capture(Commands::Authorize {
            department: "research".to_string(),
            student: None,
            worker_departments: vec![],
            admin: true,
        });
        assert_eq!(output.trim(), "granted");
    }

    #[test]
    fn held_identities_skips_absent_worker() {
        let identities = held_identities(Some("MX-9".to_string()), vec![], false);
        assert_eq!(identities.len(), 1);
        assert!(matches!(identities[0], Identity::Student { .. }));
    }

    #[test]
    #[serial]
    fn hash_then_verify_via_env_password() {
        // SAFETY: test-only env mutation, serialized.
        unsafe { std::env::set_var("MEDX_PASSWORD", "Secret123!") };
        let (result, output) = run_capture(Commands::HashPassword { salt: None });
        assert!(result.unwrap());
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let hash = json["hash"].as_str().unwrap().to_string();
        let salt = json["salt"].as_str().unwrap().to_string();

        let (result, output) = run_capture(Commands::VerifyPassword {
            hash: hash.clone(),
            salt: salt.clone(),
        });
        assert!(result.unwrap());
        assert_eq!(output.trim(), "valid");

        unsafe { std::env::set_var("MEDX_PASSWORD", "secret123!") };
        let (result, output) = run_capture(Commands::VerifyPassword { hash, salt });
        unsafe { std::env::remove_var("MEDX_PASSWORD") };
        assert!(!result.unwrap());
        assert_eq!(output.trim(), "invalid");
    }
}
