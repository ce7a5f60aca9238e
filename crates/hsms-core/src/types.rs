// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the session store, the router, and the shell.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::HsmsError;

/// The role a signed-in user acts under.
///
/// Roles decide which routes render and which menu entries are visible.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Nurse,
    Doctor,
    Patient,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Role::Nurse, Role::Doctor, Role::Patient];
}

/// Opaque, unique identifier of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        UserId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated identity bound to the running process.
///
/// Fields are private so the role cannot change once the session exists.
/// The serialized form is the value stored in the persistent session slot:
/// `{"userId", "displayName", "email", "role"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: UserId,
    display_name: String,
    email: String,
    role: Role,
}

impl Session {
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Encodes the session for the persistent slot.
    pub fn to_slot_value(&self) -> Result<String, HsmsError> {
        serde_json::to_string(self).map_err(|e| HsmsError::Internal(e.to_string()))
    }

    /// Decodes a session previously written by [`Session::to_slot_value`].
    ///
    /// Any content that does not decode into a complete session with a known
    /// role is reported as [`HsmsError::MalformedSession`].
    pub fn from_slot_value(value: &str) -> Result<Self, HsmsError> {
        serde_json::from_str(value).map_err(|e| HsmsError::MalformedSession(e.to_string()))
    }
}

/// Read-only view of "who is using the application", handed to the
/// authorization gate, the navigator, and the menu projector.
///
/// Only the session store hands these out; holders cannot mutate the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthContext<'a> {
    session: Option<&'a Session>,
    profile_complete: bool,
}

impl<'a> AuthContext<'a> {
    /// A context with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(session: Option<&'a Session>, profile_complete: bool) -> Self {
        Self {
            session,
            profile_complete,
        }
    }

    pub fn session(&self) -> Option<&'a Session> {
        self.session
    }

    pub fn role(&self) -> Option<Role> {
        self.session.map(Session::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the signed-in account has finished its profile.
    /// Always `false` when nobody is signed in.
    pub fn profile_complete(&self) -> bool {
        self.session.is_some() && self.profile_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nurse() -> Session {
        Session::new(
            UserId("1".into()),
            "Sarah Johnson",
            "nurse@clinic.edu",
            Role::Nurse,
        )
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Doctor).unwrap();
        assert_eq!(json, "\"doctor\"");
        assert_eq!("Patient".parse::<Role>().unwrap(), Role::Patient);
    }

    #[test]
    fn session_slot_value_uses_camel_case_fields() {
        let value = nurse().to_slot_value().unwrap();
        let json: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(json["userId"], "1");
        assert_eq!(json["displayName"], "Sarah Johnson");
        assert_eq!(json["email"], "nurse@clinic.edu");
        assert_eq!(json["role"], "nurse");
    }

    #[test]
    fn session_decodes_from_slot_value() {
        let raw = r#"{"userId":"2","displayName":"Dr. Michael Chen","email":"doctor@clinic.edu","role":"doctor"}"#;
        let session = Session::from_slot_value(raw).unwrap();
        assert_eq!(session.user_id().as_str(), "2");
        assert_eq!(session.role(), Role::Doctor);
    }

    #[test]
    fn malformed_slot_values_are_rejected() {
        for raw in [
            "",
            "not json",
            "{}",
            r#"{"userId":"1","displayName":"x","email":"x@y","role":"admin"}"#,
            r#"{"userId":"1","displayName":"x","role":"nurse"}"#,
        ] {
            let err = Session::from_slot_value(raw).unwrap_err();
            assert!(matches!(err, HsmsError::MalformedSession(_)), "{raw:?}");
        }
    }

    #[test]
    fn generated_user_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn anonymous_context_has_no_role() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.role(), None);
        assert!(!ctx.profile_complete());
    }

    #[test]
    fn context_exposes_session_role() {
        let session = nurse();
        let ctx = AuthContext::new(Some(&session), true);
        assert_eq!(ctx.role(), Some(Role::Nurse));
        assert!(ctx.profile_complete());
    }
}
