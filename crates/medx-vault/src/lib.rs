// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential primitives for the MedXplore portal.
//!
//! - [`kdf`]: PBKDF2-HMAC-SHA256 password hashing and verification.
//! - [`token`]: random bearer session tokens and expiry checks.
//! - [`obfuscate`]: reversible XOR+base64 email obfuscation (not encryption).
//! - [`vault`]: the [`CredentialVault`] facade tying them to configuration.

pub mod kdf;
pub mod obfuscate;
pub mod prompt;
pub mod token;
pub mod vault;

pub use kdf::PasswordHash;
pub use obfuscate::EmailObfuscator;
pub use prompt::get_password;
pub use token::SessionToken;
pub use vault::CredentialVault;
