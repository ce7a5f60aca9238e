// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, KDF minimums, and unique account emails.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{HsmsConfig, SlotBackend};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HsmsConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.session.backend == SlotBackend::Sqlite
        && config.session.database_path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "session.database_path must not be empty".to_string(),
        });
    }

    if config.session.slot_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.slot_key must not be empty".to_string(),
        });
    }

    if config.auth.kdf_memory_kib < 1024 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_memory_kib must be at least 1024 (1 MiB), got {}",
                config.auth.kdf_memory_kib
            ),
        });
    }

    if config.auth.kdf_iterations < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_iterations must be at least 1, got {}",
                config.auth.kdf_iterations
            ),
        });
    }

    if config.auth.kdf_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.kdf_parallelism must be at least 1, got {}",
                config.auth.kdf_parallelism
            ),
        });
    }

    let mut seen_emails = HashSet::new();
    for (i, account) in config.auth.accounts.iter().enumerate() {
        if account.email.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("auth.accounts[{i}].email must not be empty"),
            });
        } else if !seen_emails.insert(account.email.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate account email `{}` in [[auth.accounts]] array",
                    account.email
                ),
            });
        }

        if account.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("auth.accounts[{i}].name must not be empty"),
            });
        }

        if account.password.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("auth.accounts[{i}].password must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountSpec;
    use hsms_core::Role;

    fn account(email: &str) -> AccountSpec {
        AccountSpec {
            name: "Someone".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: Role::Nurse,
        }
    }

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = HsmsConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = HsmsConfig::default();
        config.session.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn empty_database_path_is_fine_for_memory_backend() {
        let mut config = HsmsConfig::default();
        config.session.backend = SlotBackend::Memory;
        config.session.database_path = "".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn blank_slot_key_fails_validation() {
        let mut config = HsmsConfig::default();
        config.session.slot_key = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "slot_key"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = HsmsConfig::default();
        config.app.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "app.log_level"));
    }

    #[test]
    fn weak_kdf_parameters_collect_all_errors() {
        let mut config = HsmsConfig::default();
        config.auth.kdf_memory_kib = 16;
        config.auth.kdf_iterations = 0;
        config.auth.kdf_parallelism = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_message(&errors, "kdf_memory_kib"));
        assert!(has_message(&errors, "kdf_iterations"));
        assert!(has_message(&errors, "kdf_parallelism"));
    }

    #[test]
    fn duplicate_account_emails_fail_validation() {
        let mut config = HsmsConfig::default();
        config.auth.accounts = vec![account("a@clinic.edu"), account("a@clinic.edu")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "duplicate account email"));
    }

    #[test]
    fn accounts_array_deserializes_correctly() {
        let toml_str = r#"
[[auth.accounts]]
name = "Nina Reyes"
email = "nina@clinic.edu"
password = "nina123"
role = "nurse"

[[auth.accounts]]
name = "Paul Ortiz"
email = "paul@clinic.edu"
password = "paul123"
role = "patient"
"#;
        let config: HsmsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auth.accounts.len(), 2);
        assert_eq!(config.auth.accounts[0].email, "nina@clinic.edu");
        assert_eq!(config.auth.accounts[1].role, Role::Patient);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn accounts_deny_unknown_fields() {
        let toml_str = r#"
[[auth.accounts]]
name = "Nina Reyes"
email = "nina@clinic.edu"
password = "nina123"
role = "nurse"
ward = "B"
"#;
        assert!(toml::from_str::<HsmsConfig>(toml_str).is_err());
    }

    #[test]
    fn accounts_reject_unknown_roles() {
        let toml_str = r#"
[[auth.accounts]]
name = "Ada"
email = "ada@clinic.edu"
password = "ada123"
role = "admin"
"#;
        assert!(toml::from_str::<HsmsConfig>(toml_str).is_err());
    }
}
