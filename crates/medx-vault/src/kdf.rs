// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Parameters are fixed so that hashes already stored by the portal keep
//! verifying: 100,000 iterations, 32-byte output, and a 16-byte random salt
//! rendered as lowercase hex. The hex salt string itself (its UTF-8 bytes) is
//! the PBKDF2 salt input, not the decoded bytes.

use std::num::NonZeroU32;

use medx_core::MedxError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
/// Derived key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;
/// Random salt length in bytes, before hex encoding.
pub const SALT_LEN: usize = 16;

/// A derived password hash together with the salt that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    /// 64 lowercase hex characters.
    pub hash: String,
    /// 32 lowercase hex characters.
    pub salt: String,
}

/// Generate a fresh random salt as lowercase hex.
pub fn generate_salt() -> Result<String, MedxError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| MedxError::CryptoUnavailable("failed to generate random salt".to_string()))?;
    Ok(hex::encode(salt))
}

/// Hash `password`, generating a new salt unless one is supplied.
///
/// No length or complexity rules are applied here; an empty password hashes
/// like any other.
pub fn hash_password(password: &[u8], salt: Option<&str>) -> Result<PasswordHash, MedxError> {
    let salt = match salt {
        Some(salt) => salt.to_string(),
        None => generate_salt()?,
    };
    let hash = derive_hex(password, &salt, PBKDF2_ITERATIONS)?;
    Ok(PasswordHash { hash, salt })
}

/// Re-derive with `salt` and compare against `stored_hash`.
///
/// The comparison is an ordinary string equality, matching how stored hashes
/// have always been checked.
pub fn verify_password(password: &[u8], stored_hash: &str, salt: &str) -> Result<bool, MedxError> {
    let candidate = derive_hex(password, salt, PBKDF2_ITERATIONS)?;
    Ok(candidate == stored_hash)
}

pub(crate) fn derive_hex(password: &[u8], salt: &str, iterations: u32) -> Result<String, MedxError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| MedxError::Internal("PBKDF2 iteration count must be non-zero".to_string()))?;

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt.as_bytes(),
        password,
        &mut output[..],
    );

    Ok(hex::encode(&output[..]))
}
