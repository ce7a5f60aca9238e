// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role check in front of protected pages.

use hsms_core::{Role, Session};

use crate::page::Page;

/// Outcome of checking a session against a page's allowed roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Nobody is signed in.
    Unauthenticated,
    Permitted,
    /// Signed in, but the role is not on the list.
    Denied { role: Role },
}

impl GateDecision {
    /// Where the viewer is sent instead of the requested page.
    pub fn redirect(self) -> Option<Page> {
        match self {
            GateDecision::Permitted => None,
            GateDecision::Unauthenticated => Some(Page::Login),
            GateDecision::Denied { role } => Some(denied_fallback(role)),
        }
    }
}

/// Patients are sent back to their own home page; staff get the access-denied page.
pub fn denied_fallback(role: Role) -> Page {
    match role {
        Role::Patient => Page::PatientLanding,
        Role::Nurse | Role::Doctor => Page::Unauthorized,
    }
}

pub fn authorize(session: Option<&Session>, allowed: &[Role]) -> GateDecision {
    match session {
        None => GateDecision::Unauthenticated,
        Some(s) if allowed.contains(&s.role()) => GateDecision::Permitted,
        Some(s) => GateDecision::Denied { role: s.role() },
    }
}
