// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session store: the single owner of "who is using the application".
//!
//! Every mutation writes through to the persistent slot before the in-memory
//! state changes, so a failed write leaves the store exactly as it was.
//! Readers get an [`AuthContext`] and never mutate the session themselves.

use hsms_config::HsmsConfig;
use hsms_core::{AuthContext, AuthFailure, HsmsError, Role, Session, SessionSlot, UserId};
use tracing::{debug, info, warn};

use crate::directory::Directory;
use crate::slot::open_slot;

pub struct SessionStore {
    directory: Directory,
    slot: Box<dyn SessionSlot>,
    slot_key: String,
    current: Option<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("slot_key", &self.slot_key)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// A store with no active session. Call [`SessionStore::restore_session`]
    /// once before first use to pick up a session saved by an earlier run.
    pub fn new(
        directory: Directory,
        slot: Box<dyn SessionSlot>,
        slot_key: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            slot,
            slot_key: slot_key.into(),
            current: None,
        }
    }

    /// Build the credential table and open the slot described by `config`.
    pub fn from_config(config: &HsmsConfig) -> Result<Self, HsmsError> {
        let directory = Directory::from_config(&config.auth)?;
        let slot = open_slot(&config.session)?;
        Ok(Self::new(directory, slot, config.session.slot_key.clone()))
    }

    /// Repopulate the session from the persistent slot.
    ///
    /// Slot content that does not decode is treated as no saved session.
    /// Only a failure to read the slot itself is returned as an error.
    pub fn restore_session(&mut self) -> Result<Option<&Session>, HsmsError> {
        let Some(raw) = self.slot.get(&self.slot_key)? else {
            debug!("no saved session");
            return Ok(None);
        };

        match Session::from_slot_value(&raw) {
            Ok(session) => {
                info!(
                    user_id = %session.user_id(),
                    role = %session.role(),
                    "session restored"
                );
                self.current = Some(session);
                Ok(self.current.as_ref())
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed saved session");
                Ok(None)
            }
        }
    }

    /// Sign in with an exact email and password match.
    ///
    /// On [`AuthFailure::InvalidCredentials`] nothing changes.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, HsmsError> {
        let Some(account) = self.directory.authenticate(email, password) else {
            debug!("login rejected");
            return Err(AuthFailure::InvalidCredentials.into());
        };
        let session = account.session();

        self.persist(session.clone())?;
        info!(
            user_id = %session.user_id(),
            role = %session.role(),
            "user signed in"
        );
        Ok(session)
    }

    /// Register a new patient account and sign it in.
    ///
    /// The account starts with an incomplete profile. Name and email are
    /// trimmed before use. An email that already has a credential fails with
    /// [`AuthFailure::EmailTaken`] and appends nothing; so does a failed slot
    /// write.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, HsmsError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthFailure::IncompleteForm.into());
        }
        if self.directory.contains_email(email) {
            debug!("sign-up rejected: email taken");
            return Err(AuthFailure::EmailTaken.into());
        }

        let user_id = UserId::generate();
        let session = self
            .directory
            .insert(user_id.clone(), name, email, password, Role::Patient, false)?
            .session();

        if let Err(e) = self.persist(session.clone()) {
            self.directory.remove(&user_id);
            warn!(error = %e, "sign-up rolled back");
            return Err(e);
        }
        info!(user_id = %session.user_id(), "patient account created");
        Ok(session)
    }

    /// Sign out. Calling this with nobody signed in is a no-op.
    pub fn logout(&mut self) -> Result<(), HsmsError> {
        self.slot.delete(&self.slot_key)?;
        if let Some(session) = self.current.take() {
            info!(user_id = %session.user_id(), "user signed out");
        }
        Ok(())
    }

    /// Mark the signed-in account's profile complete.
    pub fn complete_profile(&mut self) -> Result<(), HsmsError> {
        let Some(session) = &self.current else {
            return Err(AuthFailure::NotSignedIn.into());
        };
        if !self.directory.mark_profile_complete(session.user_id()) {
            return Err(HsmsError::Internal(format!(
                "no account for user {}",
                session.user_id()
            )));
        }
        info!(user_id = %session.user_id(), "profile completed");
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The read-only view handed to the router and the menu.
    ///
    /// A restored session whose account is not in this process's credential
    /// table (for example a sign-up from an earlier run) counts as complete.
    pub fn context(&self) -> AuthContext<'_> {
        let profile_complete = self
            .current
            .as_ref()
            .map(|s| {
                self.directory
                    .account(s.user_id())
                    .is_none_or(|a| a.profile_complete)
            })
            .unwrap_or(false);
        AuthContext::new(self.current.as_ref(), profile_complete)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    fn persist(&mut self, session: Session) -> Result<(), HsmsError> {
        let value = session.to_slot_value()?;
        self.slot.set(&self.slot_key, &value)?;
        self.current = Some(session);
        Ok(())
    }
}
