// SPDX-FileCopyrightText: 2026 MedXplore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams for collaborators outside the credential subsystem.

pub mod account;

pub use account::AccountStore;
