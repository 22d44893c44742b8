// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the MedXplore credential workspace.

use thiserror::Error;

/// The primary error type used across the vault, auth, and store layers.
#[derive(Debug, Error)]
pub enum MedxError {
    /// The host lacks a required cryptographic primitive (secure random source,
    /// PBKDF2). Fatal: callers must not retry.
    #[error("cryptographic primitive unavailable: {0}")]
    CryptoUnavailable(String),

    /// Malformed input to a decoding operation (base64, hex, wide token).
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration errors (invalid TOML, bad values, empty secrets).
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication or authorization failure.
    #[error("security error: {0}")]
    Security(String),

    /// Account store backend errors.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A looked-up record does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: String, key: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MedxError {
    /// Whether this error must abort the caller rather than be surfaced as a
    /// recoverable result.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MedxError::CryptoUnavailable(_) | MedxError::Internal(_))
    }
}
