// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end navigation tests.
//!
//! `TestHarness` wires a [`SessionStore`] over an in-memory slot to the
//! standard [`Navigator`], with Argon2id parameters cheap enough for tests.
//! [`TestHarness::restart`] drops the store and builds a fresh one over the
//! same slot, the way a relaunch of the application would.

use hsms_auth::{Directory, KdfParams, MemorySlot, SessionStore};
use hsms_core::{HsmsError, Role, SessionSlot, UserId};
use hsms_router::{MenuEntry, Navigation, Navigator, landing_page};
use tracing::debug;

use crate::mock_slot::FlakySlot;

/// Slot key used by every harness.
pub const SLOT_KEY: &str = "hsms_user";

#[derive(Debug, Clone)]
struct SeedAccount {
    name: String,
    email: String,
    password: String,
    role: Role,
}

/// Builder for [`TestHarness`].
#[derive(Debug, Clone)]
pub struct TestHarnessBuilder {
    demo_accounts: bool,
    accounts: Vec<SeedAccount>,
    saved_value: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            demo_accounts: true,
            accounts: Vec::new(),
            saved_value: None,
        }
    }

    /// Seed the demo nurse, doctor, and student accounts (on by default).
    pub fn with_demo_accounts(mut self, enabled: bool) -> Self {
        self.demo_accounts = enabled;
        self
    }

    /// Seed an extra account with a completed profile.
    pub fn with_account(mut self, name: &str, email: &str, password: &str, role: Role) -> Self {
        self.accounts.push(SeedAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
        self
    }

    /// Pre-populate the slot as if an earlier run had saved this value.
    pub fn with_saved_value(mut self, raw: impl Into<String>) -> Self {
        self.saved_value = Some(raw.into());
        self
    }

    /// Build the harness and restore whatever session the slot holds.
    pub fn build(self) -> Result<TestHarness, HsmsError> {
        let slot = FlakySlot::new(MemorySlot::new());
        if let Some(raw) = &self.saved_value {
            slot.set(SLOT_KEY, raw)?;
        }
        let navigator = Navigator::standard()?;
        let store = open_store(&self, &slot)?;
        Ok(TestHarness {
            store,
            slot,
            navigator,
            seed: self,
        })
    }
}

/// Argon2id parameters cheap enough for tests.
pub fn test_kdf() -> KdfParams {
    KdfParams {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    }
}

fn open_store(seed: &TestHarnessBuilder, slot: &FlakySlot) -> Result<SessionStore, HsmsError> {
    let mut directory = Directory::new(test_kdf())?;
    if seed.demo_accounts {
        directory.seed_demo_accounts()?;
    }
    for account in &seed.accounts {
        directory.insert(
            UserId::generate(),
            &account.name,
            &account.email,
            &account.password,
            account.role,
            true,
        )?;
    }
    let mut store = SessionStore::new(directory, Box::new(slot.clone()), SLOT_KEY);
    store.restore_session()?;
    Ok(store)
}

/// A session store and navigator sharing one in-memory slot.
pub struct TestHarness {
    pub store: SessionStore,
    /// Shared with the store; flip [`FlakySlot::fail_writes`] to simulate storage outages.
    pub slot: FlakySlot,
    pub navigator: Navigator,
    seed: TestHarnessBuilder,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Navigate as whoever is currently signed in.
    pub fn go(&self, path: &str) -> Navigation {
        self.navigator.navigate(path, &self.store.context())
    }

    /// Navigate to the current viewer's landing page.
    pub fn go_home(&self) -> Navigation {
        let ctx = self.store.context();
        self.navigator.navigate(landing_page(&ctx).path(), &ctx)
    }

    pub fn menu(&self) -> Vec<&'static MenuEntry> {
        self.navigator.menu(&self.store.context())
    }

    pub fn menu_labels(&self) -> Vec<&'static str> {
        self.menu().into_iter().map(|e| e.label).collect()
    }

    /// Raw value currently in the slot.
    pub fn saved_value(&self) -> Option<String> {
        self.slot.get(SLOT_KEY).ok().flatten()
    }

    /// Replace the store with a fresh one over the same slot.
    ///
    /// Accounts created by sign-up are not carried over; the credential
    /// table is rebuilt from the builder's seeds.
    pub fn restart(&mut self) -> Result<(), HsmsError> {
        debug!("restarting session store");
        self.store = open_store(&self.seed, &self.slot)?;
        Ok(())
    }
}
