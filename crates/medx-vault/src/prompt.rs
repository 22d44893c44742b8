// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via the MEDX_PASSWORD environment variable or a TTY prompt.

use medx_core::MedxError;
use secrecy::SecretString;

/// The environment variable name for supplying a password non-interactively.
pub const PASSWORD_ENV_VAR: &str = "MEDX_PASSWORD";

/// Get a password from `MEDX_PASSWORD` or, failing that, an interactive prompt.
///
/// Empty values are rejected here; the vault itself would hash them.
pub fn get_password(label: &str) -> Result<SecretString, MedxError> {
    if let Ok(value) = std::env::var(PASSWORD_ENV_VAR)
        && !value.is_empty()
    {
        return Ok(SecretString::from(value));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("{label}: ");
        let password = rpassword::read_password()
            .map_err(|e| MedxError::Internal(format!("failed to read password: {e}")))?;
        if password.is_empty() {
            return Err(MedxError::Security("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(password));
    }

    Err(MedxError::Config(format!(
        "No password provided. Set {PASSWORD_ENV_VAR} or run interactively."
    )))
}
