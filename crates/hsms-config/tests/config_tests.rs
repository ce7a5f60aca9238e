// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the HSMS configuration system.

use hsms_config::diagnostic::ConfigError;
use hsms_config::model::{HsmsConfig, SlotBackend};
use hsms_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use hsms_core::Role;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_hsms_config() {
    let toml = r#"
[app]
name = "uic-clinic"
log_level = "debug"

[session]
backend = "sqlite"
database_path = "/tmp/hsms-test.db"
slot_key = "clinic_user"

[auth]
seed_demo_accounts = false
kdf_memory_kib = 4096
kdf_iterations = 3
kdf_parallelism = 2

[[auth.accounts]]
name = "Nina Reyes"
email = "nina@clinic.edu"
password = "nina123"
role = "nurse"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "uic-clinic");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.session.backend, SlotBackend::Sqlite);
    assert_eq!(config.session.database_path, "/tmp/hsms-test.db");
    assert_eq!(config.session.slot_key, "clinic_user");
    assert!(!config.auth.seed_demo_accounts);
    assert_eq!(config.auth.kdf_memory_kib, 4096);
    assert_eq!(config.auth.kdf_iterations, 3);
    assert_eq!(config.auth.kdf_parallelism, 2);
    assert_eq!(config.auth.accounts.len(), 1);
    assert_eq!(config.auth.accounts[0].role, Role::Nurse);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "hsms");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.session.backend, SlotBackend::Sqlite);
    assert_eq!(config.session.slot_key, "hsms_user");
    assert!(config.session.database_path.ends_with("hsms.db"));
    assert!(config.auth.seed_demo_accounts);
    assert_eq!(config.auth.kdf_memory_kib, 19456);
    assert_eq!(config.auth.kdf_iterations, 2);
    assert_eq!(config.auth.kdf_parallelism, 1);
    assert!(config.auth.accounts.is_empty());
}

/// Unknown field in [session] produces an UnknownField error.
#[test]
fn unknown_field_in_session_produces_error() {
    let toml = r#"
[session]
slot_kye = "x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("slot_kye"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dotted overrides (what the env provider produces) win over TOML.
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{Figment, providers::{Format, Serialized, Toml}};

    let config: HsmsConfig = Figment::new()
        .merge(Serialized::defaults(HsmsConfig::default()))
        .merge(Toml::string("[session]\nslot_key = \"from-toml\"\n"))
        .merge(("session.slot_key", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.session.slot_key, "from-env");
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{Figment, providers::{Format, Serialized, Toml}};

    let config: HsmsConfig = Figment::new()
        .merge(Serialized::defaults(HsmsConfig::default()))
        .merge(Toml::file("/nonexistent/path/hsms.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.app.name, "hsms");
}

/// Unknown key produces an UnknownKey diagnostic with a suggestion and the valid keys.
#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[session]
slot_kye = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "slot_kye"
                && suggestion.as_deref() == Some("slot_key")
                && valid_keys.contains("database_path")
        })
    });
    assert!(found, "expected UnknownKey for slot_kye, got: {errors:?}");
}

/// Invalid type (string where number expected) produces a type diagnostic.
#[test]
fn diagnostic_invalid_type() {
    let toml = r#"
[auth]
kdf_iterations = "many"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(
                e,
                ConfigError::InvalidType { key, .. } if key.contains("kdf_iterations")
            )),
        "got: {errors:?}"
    );
}

/// ConfigError implements miette::Diagnostic with a code and help.
#[test]
fn config_error_implements_diagnostic() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "slot_kye".to_string(),
        suggestion: Some("slot_key".to_string()),
        valid_keys: "backend, database_path, slot_key".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `slot_key`"), "got: {help}");
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::Validation {
        message: "session.slot_key must not be empty".to_string(),
    };

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("slot_key"));
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_catches_weak_kdf() {
    let toml = r#"
[auth]
kdf_memory_kib = 64
"#;

    let errors = load_and_validate_str(toml).expect_err("weak KDF should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("kdf_memory_kib"))
    }));
}

/// A config file on disk loads and validates.
#[test]
fn load_and_validate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hsms.toml");
    std::fs::write(&path, "[session]\nbackend = \"memory\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should validate");
    assert_eq!(config.session.backend, SlotBackend::Memory);
}

/// An unknown key in a config file points into that file.
#[test]
fn unknown_key_in_file_carries_source_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hsms.toml");
    std::fs::write(&path, "[app]\nnaem = \"x\"\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("should reject unknown key");
    let span_found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, span: Some(_), src: Some(_), .. } if key == "naem"
        )
    });
    assert!(span_found, "expected a located UnknownKey, got: {errors:?}");
}
