// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation menu, filtered by the viewer's role.

use hsms_core::Role;

use crate::page::Page;

/// A labeled link in the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub page: Page,
}

impl MenuEntry {
    const fn new(label: &'static str, page: Page) -> Self {
        Self { label, page }
    }

    pub fn path(&self) -> &'static str {
        self.page.path()
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        self.page.access().roles()
    }
}

/// The full menu in display order.
pub const MENU: &[MenuEntry] = &[
    MenuEntry::new("Dashboard", Page::Dashboard),
    MenuEntry::new("Home", Page::PatientLanding),
    MenuEntry::new("Search", Page::Patients),
    MenuEntry::new("Appointments", Page::Appointments),
    MenuEntry::new("Book Appointment", Page::BookAppointment),
    MenuEntry::new("Prescriptions", Page::Prescriptions),
    MenuEntry::new("Medical Services", Page::MedicalServices),
    MenuEntry::new("Staff Directory", Page::StaffDirectory),
    MenuEntry::new("Stocks", Page::Stocks),
    MenuEntry::new("History", Page::ClinicHistory),
    MenuEntry::new("Reports", Page::Reports),
    MenuEntry::new("Chat", Page::Chat),
    MenuEntry::new("Nurses by Campus", Page::NursesByCampus),
    MenuEntry::new("About Us", Page::AboutUs),
];

/// Entries of [`MENU`] visible to `role`.
pub fn project_menu(role: Option<Role>) -> Vec<&'static MenuEntry> {
    project(MENU, role)
}

/// Order-preserving filter of `entries` by role membership.
///
/// Nobody signed in sees only public entries.
pub fn project(entries: &[MenuEntry], role: Option<Role>) -> Vec<&MenuEntry> {
    entries
        .iter()
        .filter(|entry| entry.page.access().admits(role))
        .collect()
}
