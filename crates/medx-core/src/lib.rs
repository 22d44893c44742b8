// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the MedXplore credential workspace.
//!
//! Provides the shared error type, the identity and account types, the
//! clock abstraction used for token expiry, and the account store trait.

pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::MedxError;
pub use traits::AccountStore;
pub use types::{ALL_DEPARTMENTS, AccountId, AccountRecord, Department, Identity, Role};
