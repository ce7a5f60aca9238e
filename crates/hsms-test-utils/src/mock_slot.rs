// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A session slot with switchable write failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use hsms_auth::MemorySlot;
use hsms_core::{HsmsError, SessionSlot};

/// Wraps a [`MemorySlot`]. While failing, `set` and `delete` return a
/// storage error without touching the stored value. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FlakySlot {
    inner: MemorySlot,
    failing: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FlakySlot {
    pub fn new(inner: MemorySlot) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Successful `set` and `delete` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), HsmsError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HsmsError::storage(std::io::Error::other(
                "session slot unavailable",
            )));
        }
        Ok(())
    }
}

impl SessionSlot for FlakySlot {
    fn get(&self, key: &str) -> Result<Option<String>, HsmsError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HsmsError> {
        self.check()?;
        self.inner.set(key, value)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), HsmsError> {
        self.check()?;
        self.inner.delete(key)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
