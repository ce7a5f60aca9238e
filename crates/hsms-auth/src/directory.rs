// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential table and the accounts it links to.
//!
//! Credentials are seeded at startup and appended on sign-up; nothing is ever
//! removed. Emails are unique across the table and compared exactly.

use hsms_config::model::{AccountSpec, AuthConfig};
use hsms_core::{AuthFailure, HsmsError, Role, Session, UserId};
use tracing::debug;

use crate::password::{KdfParams, PasswordHasher};

/// The demo accounts seeded when `auth.seed_demo_accounts` is on:
/// `(user id, display name, email, password, role)`.
pub const DEMO_ACCOUNTS: [(&str, &str, &str, &str, Role); 3] = [
    ("1", "Sarah Johnson", "nurse@clinic.edu", "nurse123", Role::Nurse),
    ("2", "Dr. Michael Chen", "doctor@clinic.edu", "doctor123", Role::Doctor),
    ("3", "Alex Smith", "student@clinic.edu", "student123", Role::Patient),
];

/// A login credential. The password is held only as an Argon2id PHC string.
#[derive(Clone)]
pub struct CredentialRecord {
    pub email: String,
    password_hash: String,
    /// Account this credential signs into.
    pub user_id: Option<UserId>,
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// A user account: the identity a session is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    /// Seeded accounts start complete; sign-ups start incomplete.
    pub profile_complete: bool,
}

impl Account {
    pub fn session(&self) -> Session {
        Session::new(
            self.user_id.clone(),
            self.display_name.clone(),
            self.email.clone(),
            self.role,
        )
    }
}

/// Credential records plus the accounts they link to.
#[derive(Debug)]
pub struct Directory {
    hasher: PasswordHasher,
    credentials: Vec<CredentialRecord>,
    accounts: Vec<Account>,
}

impl Directory {
    /// An empty directory hashing with `params`.
    pub fn new(params: KdfParams) -> Result<Self, HsmsError> {
        Ok(Self {
            hasher: PasswordHasher::new(params)?,
            credentials: Vec::new(),
            accounts: Vec::new(),
        })
    }

    /// A directory seeded according to the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, HsmsError> {
        let mut directory = Self::new(KdfParams::from(config))?;
        if config.seed_demo_accounts {
            directory.seed_demo_accounts()?;
        }
        for spec in &config.accounts {
            directory.seed_spec(spec)?;
        }
        debug!(
            credentials = directory.credentials.len(),
            "credential table seeded"
        );
        Ok(directory)
    }

    /// Seed the nurse, doctor, and student demo accounts.
    pub fn seed_demo_accounts(&mut self) -> Result<(), HsmsError> {
        for (id, name, email, password, role) in DEMO_ACCOUNTS {
            self.insert(UserId(id.to_string()), name, email, password, role, true)?;
        }
        Ok(())
    }

    fn seed_spec(&mut self, spec: &AccountSpec) -> Result<(), HsmsError> {
        self.insert(
            UserId::generate(),
            &spec.name,
            &spec.email,
            &spec.password,
            spec.role,
            true,
        )
        .map(|_| ())
    }

    /// Add a credential record and its account.
    ///
    /// Fails with [`AuthFailure::EmailTaken`] if the email already has a
    /// credential; nothing is appended in that case.
    pub fn insert(
        &mut self,
        user_id: UserId,
        display_name: &str,
        email: &str,
        password: &str,
        role: Role,
        profile_complete: bool,
    ) -> Result<&Account, HsmsError> {
        if self.contains_email(email) {
            return Err(AuthFailure::EmailTaken.into());
        }

        let password_hash = self.hasher.hash(password)?;
        self.credentials.push(CredentialRecord {
            email: email.to_string(),
            password_hash,
            user_id: Some(user_id.clone()),
        });
        self.accounts.push(Account {
            user_id,
            display_name: display_name.to_string(),
            email: email.to_string(),
            role,
            profile_complete,
        });

        let index = self.accounts.len() - 1;
        Ok(&self.accounts[index])
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.credentials.iter().any(|c| c.email == email)
    }

    /// Find the account whose credential matches `email` and `password` exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        let credential = self.credentials.iter().find(|c| c.email == email)?;
        if !self.hasher.verify(password, &credential.password_hash) {
            return None;
        }
        match &credential.user_id {
            Some(id) => self.account(id),
            None => self.accounts.iter().find(|a| a.email == email),
        }
    }

    pub fn account(&self, user_id: &UserId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.user_id == user_id)
    }

    /// Mark an account's profile complete. Returns `false` for unknown ids.
    pub fn mark_profile_complete(&mut self, user_id: &UserId) -> bool {
        match self.accounts.iter_mut().find(|a| &a.user_id == user_id) {
            Some(account) => {
                account.profile_complete = true;
                true
            }
            None => false,
        }
    }

    /// Drop an account and its credential. Returns `false` for unknown ids.
    pub(crate) fn remove(&mut self, user_id: &UserId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| &a.user_id != user_id);
        self.credentials.retain(|c| c.user_id.as_ref() != Some(user_id));
        self.accounts.len() != before
    }

    pub fn credentials(&self) -> &[CredentialRecord] {
        &self.credentials
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}
