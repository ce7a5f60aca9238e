// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the HSMS clinic application.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use hsms_core::Role;
use serde::{Deserialize, Serialize};

/// Top-level HSMS configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HsmsConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Persistent session slot settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Credential table seeding and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in the shell banner.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "hsms".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the saved session lives between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotBackend {
    /// A key-value table in a SQLite file.
    #[default]
    Sqlite,
    /// Process memory only; the session is forgotten on exit.
    Memory,
}

/// Persistent session slot configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Slot backend.
    #[serde(default)]
    pub backend: SlotBackend,

    /// Path to the SQLite database file (sqlite backend only).
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Fixed key the serialized session is stored under.
    #[serde(default = "default_slot_key")]
    pub slot_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SlotBackend::default(),
            database_path: default_database_path(),
            slot_key: default_slot_key(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("hsms").join("hsms.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("hsms.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_slot_key() -> String {
    "hsms_user".to_string()
}

/// Credential table configuration.
///
/// Passwords are stored as Argon2id hashes; the KDF defaults match the
/// argon2 crate's recommended parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Seed the nurse, doctor, and student demo accounts at startup.
    #[serde(default = "default_seed_demo_accounts")]
    pub seed_demo_accounts: bool,

    /// Argon2id memory cost in KiB (default: 19456 = 19 MiB).
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,

    /// Argon2id iteration count (default: 2).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id parallelism lanes (default: 1).
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,

    /// Additional accounts seeded at startup.
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            seed_demo_accounts: default_seed_demo_accounts(),
            kdf_memory_kib: default_kdf_memory_kib(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
            accounts: Vec::new(),
        }
    }
}

fn default_seed_demo_accounts() -> bool {
    true
}

fn default_kdf_memory_kib() -> u32 {
    19456
}

fn default_kdf_iterations() -> u32 {
    2
}

fn default_kdf_parallelism() -> u32 {
    1
}

/// An account seeded from `[[auth.accounts]]`.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSpec {
    /// Display name.
    pub name: String,

    /// Login email; must be unique across all seeded accounts.
    pub email: String,

    /// Plaintext password, hashed when the credential table is built.
    pub password: String,

    /// Role the account signs in under.
    pub role: Role,
}

impl std::fmt::Debug for AccountSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSpec")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("role", &self.role)
            .finish()
    }
}
