// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the HSMS clinic application.
//!
//! - [`Directory`]: the credential table (Argon2id hashes) and its accounts
//! - [`MemorySlot`] / [`SqliteSlot`]: persistent session slot backends
//! - [`SessionStore`]: login, sign-up, logout, and session restore

pub mod directory;
pub mod password;
pub mod slot;
pub mod store;

pub use directory::{Account, CredentialRecord, DEMO_ACCOUNTS, Directory};
pub use password::{KdfParams, PasswordHasher};
pub use slot::{MemorySlot, SqliteSlot, open_slot};
pub use store::SessionStore;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::password::KdfParams;

    /// Argon2id parameters cheap enough for unit tests.
    pub fn cheap_kdf() -> KdfParams {
        KdfParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }
}
