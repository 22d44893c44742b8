// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Department access gate over the portal's two identity systems.
//!
//! A visitor may hold a student session, a worker session, both, or neither.
//! Access is granted when ANY held identity is privileged for the department.
//! A missing or unprivileged identity never denies on its own.

use medx_core::{Department, Identity, MedxError};
use tracing::debug;

/// Whether a single identity may open `department`'s dashboard.
pub fn authorize(identity: &Identity, department: &Department) -> bool {
    match identity {
        Identity::Admin | Identity::Worker { is_admin: true, .. } => true,
        Identity::Worker { departments, .. } => departments
            .iter()
            .any(|d| d.is_all() || d == department),
        Identity::Student { .. } | Identity::Anonymous => false,
    }
}

/// OR-combination over every identity the visitor currently holds.
pub fn authorize_any<'a, I>(identities: I, department: &Department) -> bool
where
    I: IntoIterator<Item = &'a Identity>,
{
    identities
        .into_iter()
        .any(|identity| authorize(identity, department))
}

/// [`authorize_any`], turning a denial into [`MedxError::Security`].
pub fn require_access(identities: &[Identity], department: &Department) -> Result<(), MedxError> {
    if authorize_any(identities, department) {
        debug!(department = %department, "department access granted");
        Ok(())
    } else {
        let roles: Vec<String> = identities.iter().map(|i| i.role().to_string()).collect();
        debug!(department = %department, roles = ?roles, "department access denied");
        Err(MedxError::Security(format!(
            "access to department `{department}` denied"
        )))
    }
}
