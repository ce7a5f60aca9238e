// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the HSMS clinic application.

use thiserror::Error;

/// A declined authentication request.
///
/// Auth failures never mutate session state. They are surfaced to the user
/// as a non-fatal notice and the caller stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// No credential record matches the given email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Sign-up was attempted with an email that already has a credential record.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Sign-up was attempted with a blank name, email, or password.
    #[error("name, email and password are required")]
    IncompleteForm,

    /// The operation needs an active session and there is none.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// The primary error type used across the workspace.
#[derive(Debug, Error)]
pub enum HsmsError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Session slot backend errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A login or sign-up request was declined.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// The persisted session slot held content that could not be decoded.
    #[error("malformed session data: {0}")]
    MalformedSession(String),

    /// Password hashing or hash parsing failed.
    #[error("credential error: {message}")]
    Credential { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HsmsError {
    /// Wraps any error from a storage backend.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HsmsError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns the auth failure if this error is a declined auth request.
    pub fn auth_failure(&self) -> Option<&AuthFailure> {
        match self {
            HsmsError::Auth(failure) => Some(failure),
            _ => None,
        }
    }
}
