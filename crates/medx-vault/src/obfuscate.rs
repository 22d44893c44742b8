// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reversible email obfuscation.
//!
//! This is NOT encryption. Each UTF-16 code unit of the email is XORed with
//! the cycling code units of a shared key that ships with every client, then
//! base64-encoded. Anyone holding the key (or the client) can reverse it. It
//! only keeps raw addresses out of the account store.
//!
//! Token forms:
//! - narrow: every XORed unit fits in a byte, so the units are base64-encoded
//!   one byte each. This is the form stored by the original portal.
//! - wide: `w:` followed by base64 of the big-endian XORed units, used when
//!   some unit does not fit in a byte. `:` is outside the base64 alphabet so
//!   the two forms cannot collide.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use medx_core::MedxError;
use tracing::warn;
use zeroize::Zeroizing;

const WIDE_PREFIX: &str = "w:";

/// Standard alphabet, padded on encode, padding optional on decode.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// XOR+base64 obfuscator keyed by a shared secret string.
pub struct EmailObfuscator {
    key: Zeroizing<Vec<u16>>,
}

impl std::fmt::Debug for EmailObfuscator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailObfuscator")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl EmailObfuscator {
    /// Build an obfuscator from the shared key. An empty key is rejected.
    pub fn new(secret: &str) -> Result<Self, MedxError> {
        let key: Vec<u16> = secret.encode_utf16().collect();
        if key.is_empty() {
            return Err(MedxError::Config(
                "email obfuscation key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    /// Obfuscate a plaintext email into a storable token.
    pub fn obfuscate(&self, plaintext: &str) -> String {
        let units = self.xor(plaintext.encode_utf16());

        if units.iter().all(|&u| u <= 0xFF) {
            let bytes: Vec<u8> = units.iter().map(|&u| u as u8).collect();
            BASE64.encode(bytes)
        } else {
            let bytes: Vec<u8> = units.iter().flat_map(|u| u.to_be_bytes()).collect();
            format!("{WIDE_PREFIX}{}", BASE64.encode(bytes))
        }
    }

    /// Recover the plaintext, or `None` if the token cannot be decoded.
    ///
    /// `None` means "could not recover", never an empty address.
    pub fn reveal(&self, token: &str) -> Option<String> {
        match self.try_reveal(token) {
            Ok(plaintext) => Some(plaintext),
            Err(e) => {
                warn!(error = %e, "could not reveal obfuscated email");
                None
            }
        }
    }

    /// Like [`reveal`](Self::reveal) but reports why decoding failed.
    pub fn try_reveal(&self, token: &str) -> Result<String, MedxError> {
        // Embedded whitespace is ignored, as browser base64 decoding does.
        let token: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        let units: Vec<u16> = match token.strip_prefix(WIDE_PREFIX) {
            Some(body) => {
                let bytes = decode_base64(body)?;
                if bytes.len() % 2 != 0 {
                    return Err(MedxError::Decode(format!(
                        "wide token has odd byte length {}",
                        bytes.len()
                    )));
                }
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect()
            }
            None => decode_base64(&token)?.into_iter().map(u16::from).collect(),
        };

        let plain = self.xor(units.into_iter());
        String::from_utf16(&plain)
            .map_err(|e| MedxError::Decode(format!("revealed email is not valid UTF-16: {e}")))
    }

    fn xor(&self, units: impl Iterator<Item = u16>) -> Vec<u16> {
        units
            .zip(self.key.iter().cycle())
            .map(|(unit, k)| unit ^ k)
            .collect()
    }
}

fn decode_base64(input: &str) -> Result<Vec<u8>, MedxError> {
    BASE64
        .decode(input)
        .map_err(|e| MedxError::Decode(format!("invalid base64: {e}")))
}
