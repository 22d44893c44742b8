// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer session tokens and their expiry arithmetic.
//!
//! Tokens are not tracked here. The account store persists them and asks
//! [`is_expired`] whether a stored expiry has passed.

use medx_core::{Clock, MedxError};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

/// Random bytes per token (64 hex characters).
pub const TOKEN_LEN: usize = 32;

/// Default token lifetime: 24 hours in milliseconds.
pub const DEFAULT_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// A freshly issued token and the epoch-millisecond instant it lapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub expiry: i64,
}

impl SessionToken {
    /// Generate a token expiring `ttl_millis` after the clock's current time.
    pub fn issue(clock: &dyn Clock, ttl_millis: i64) -> Result<Self, MedxError> {
        Ok(Self {
            token: generate_token()?,
            expiry: expiry_from_now(clock, ttl_millis),
        })
    }
}

/// 32 bytes from the system CSPRNG, lowercase hex.
///
/// No uniqueness check is made against previously issued tokens.
pub fn generate_token() -> Result<String, MedxError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; TOKEN_LEN];
    rng.fill(&mut bytes).map_err(|_| {
        MedxError::CryptoUnavailable("failed to generate random session token".to_string())
    })?;
    Ok(hex::encode(bytes))
}

pub fn expiry_from_now(clock: &dyn Clock, ttl_millis: i64) -> i64 {
    clock.now_millis().saturating_add(ttl_millis)
}

/// True iff the current time is strictly after `expiry`.
pub fn is_expired(clock: &dyn Clock, expiry: i64) -> bool {
    clock.now_millis() > expiry
}
