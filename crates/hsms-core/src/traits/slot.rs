// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent key-value slot trait for the saved session.

use crate::error::HsmsError;

/// A persistent key-value store holding the serialized session.
///
/// The session store reads one fixed key at startup, writes it on login and
/// sign-up, and deletes it on logout. Implementations must make writes
/// visible to the next `get`, including one issued by a later process.
pub trait SessionSlot: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, HsmsError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), HsmsError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), HsmsError>;
}
