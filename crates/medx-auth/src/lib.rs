// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access control for the MedXplore portal.
//!
//! [`gate`] decides whether the identities a visitor holds open a department
//! dashboard. [`session`] runs worker login and session checks on top of the
//! credential vault and an [`AccountStore`](medx_core::AccountStore).

pub mod gate;
pub mod session;
pub mod store;

pub use gate::{authorize, authorize_any, require_access};
pub use session::{IssuedSession, SessionManager};
pub use store::MemoryAccountStore;
