// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the collaborators the core consumes.

pub mod slot;

pub use slot::SessionSlot;
