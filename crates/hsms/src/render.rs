// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of routes, menus, and navigation outcomes.

use std::fmt::Write;

use hsms_core::Role;
use hsms_router::{MenuEntry, Navigation, Page, Params, RouteTable};

fn roles_label(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "public".to_string();
    }
    roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per route: pattern, page, and who may see it.
pub fn route_table(table: &RouteTable) -> String {
    let mut out = String::new();
    for entry in table.entries() {
        let _ = writeln!(
            out,
            "{:<20} {:<18} {}",
            entry.pattern().as_str(),
            entry.page().to_string(),
            roles_label(entry.allowed_roles())
        );
    }
    let _ = writeln!(out, "{:<20} {:<18} {}", "*", Page::NotFound.to_string(), "-");
    out
}

pub fn menu(entries: &[&MenuEntry]) -> String {
    if entries.is_empty() {
        return "(no menu entries)\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{:<18} {}", entry.label, entry.path());
    }
    out
}

/// A rendered page: its title, bound parameters, and the viewer's menu.
pub fn page(page: Page, params: &Params, menu: &[&MenuEntry]) -> String {
    let mut out = format!("[{}] {}\n", page, page.title());
    for (name, value) in params.iter() {
        let _ = writeln!(out, "  {name} = {value}");
    }
    if !menu.is_empty() {
        let labels: Vec<_> = menu.iter().map(|e| e.label).collect();
        let _ = writeln!(out, "  menu: {}", labels.join(" | "));
    }
    out
}

/// One-line summary of a navigation outcome.
pub fn outcome(path: &str, navigation: &Navigation) -> String {
    match navigation {
        Navigation::Render { page, params } if params.is_empty() => {
            format!("{path} -> render {page}")
        }
        Navigation::Render { page, params } => {
            let bound: Vec<_> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{path} -> render {page} ({})", bound.join(", "))
        }
        Navigation::Redirect { to, reason } => {
            format!("{path} -> redirect {} ({reason})", to.path())
        }
        Navigation::NotFound { .. } => format!("{path} -> not found"),
    }
}
