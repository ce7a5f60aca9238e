// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for HSMS integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - session store, slot, and navigator wired together in memory
//! - [`FlakySlot`] - session slot whose writes can be made to fail on demand

pub mod harness;
pub mod mock_slot;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_slot::FlakySlot;
