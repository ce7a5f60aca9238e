// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a requested path and the current viewer into what to show.

use hsms_core::{AuthContext, Role};
use tracing::debug;

use crate::gate::{GateDecision, authorize};
use crate::menu::{MenuEntry, project_menu};
use crate::page::Page;
use crate::pattern::Params;
use crate::table::{Resolution, RouteTable, RouteTableError};

/// Why the navigator sent the viewer somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RedirectReason {
    /// Protected page requested with nobody signed in.
    Unauthenticated,
    /// Signed-in role is not allowed on the page.
    Forbidden,
    /// The sign-in page was requested while already signed in.
    AlreadySignedIn,
}

/// What the caller should show for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render { page: Page, params: Params },
    Redirect { to: Page, reason: RedirectReason },
    NotFound { path: String },
}

impl Navigation {
    /// The page to display: the rendered page, the redirect target, or the
    /// not-found page.
    pub fn page(&self) -> Page {
        match self {
            Navigation::Render { page, .. } => *page,
            Navigation::Redirect { to, .. } => *to,
            Navigation::NotFound { .. } => Page::NotFound,
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Navigation::Render { .. })
    }
}

/// Where a viewer starts after signing in.
pub fn landing_page(ctx: &AuthContext<'_>) -> Page {
    match ctx.role() {
        None => Page::Login,
        Some(Role::Nurse | Role::Doctor) => Page::Dashboard,
        Some(Role::Patient) if ctx.profile_complete() => Page::PatientLanding,
        Some(Role::Patient) => Page::CompleteProfile,
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// A navigator over [`RouteTable::standard`].
    pub fn standard() -> Result<Self, RouteTableError> {
        RouteTable::standard().map(Self::new)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn menu(&self, ctx: &AuthContext<'_>) -> Vec<&'static MenuEntry> {
        project_menu(ctx.role())
    }

    pub fn navigate(&self, path: &str, ctx: &AuthContext<'_>) -> Navigation {
        let (entry, params) = match self.table.resolve(path) {
            Resolution::Matched { entry, params } => (entry, params),
            Resolution::NotFound => {
                debug!(path, "no route matched");
                return Navigation::NotFound {
                    path: path.to_string(),
                };
            }
        };
        let page = entry.page();

        if page == Page::Login && ctx.is_authenticated() {
            return redirect(path, landing_page(ctx), RedirectReason::AlreadySignedIn);
        }
        if entry.access().is_public() {
            return Navigation::Render { page, params };
        }

        let decision = authorize(ctx.session(), entry.allowed_roles());
        if let Some(to) = decision.redirect() {
            let reason = match decision {
                GateDecision::Unauthenticated => RedirectReason::Unauthenticated,
                _ => RedirectReason::Forbidden,
            };
            return redirect(path, to, reason);
        }

        debug!(path, page = %page, "rendering");
        Navigation::Render { page, params }
    }
}

fn redirect(path: &str, to: Page, reason: RedirectReason) -> Navigation {
    debug!(path, to = %to, reason = %reason, "redirecting");
    Navigation::Redirect { to, reason }
}
