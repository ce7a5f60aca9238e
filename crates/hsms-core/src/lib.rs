// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the HSMS clinic application.
//!
//! This crate provides the types shared by every other crate in the
//! workspace: roles, user identifiers, the [`Session`] value and the
//! read-only [`AuthContext`] handed to the router, plus the error taxonomy
//! and the [`SessionSlot`] key-value trait that persistence backends implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{AuthFailure, HsmsError};
pub use traits::SessionSlot;
pub use types::{AuthContext, Role, Session, UserId};
