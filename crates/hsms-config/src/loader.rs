// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hsms.toml` > `~/.config/hsms/hsms.toml` > `/etc/hsms/hsms.toml`
//! with environment variable overrides via the `HSMS_` prefix.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use figment::{Figment, providers::{Env, Format, Serialized, Toml}};

use crate::model::HsmsConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG: &str = "/etc/hsms/hsms.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG: &str = "hsms.toml";

/// `~/.config/hsms/hsms.toml` (or the platform equivalent).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hsms").join("hsms.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hsms/hsms.toml`
/// 3. `~/.config/hsms/hsms.toml`
/// 4. `./hsms.toml`
/// 5. `HSMS_*` environment variables
pub fn load_config() -> Result<HsmsConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<HsmsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HsmsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HsmsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HsmsConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HsmsConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `HSMS_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscores inside
/// key names survive: `HSMS_SESSION_SLOT_KEY` is `session.slot_key`.
fn env_provider() -> Env {
    Env::prefixed("HSMS_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    key.replacen("app_", "app.", 1)
        .replacen("session_", "session.", 1)
        .replacen("auth_", "auth.", 1)
}
