// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pages of the application and who may see them.
//!
//! This is the one place role permissions are declared. The route table and
//! the navigation menu both read [`Page::access`], so a page cannot be
//! routable for one set of roles and listed in the menu for another.

use hsms_core::Role;
use strum::{Display, EnumIter, IntoStaticStr};

use Role::{Doctor, Nurse, Patient};

const STAFF: &[Role] = &[Nurse, Doctor];
const EVERYONE: &[Role] = &[Nurse, Doctor, Patient];
const NURSES: &[Role] = &[Nurse];
const DOCTORS: &[Role] = &[Doctor];
const PATIENTS: &[Role] = &[Patient];

/// Who may render a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Rendered for anyone, signed in or not. The gate is not consulted.
    Public,
    /// Rendered only for a signed-in user holding one of these roles.
    Roles(&'static [Role]),
}

impl Access {
    /// The roles the gate admits. Empty for public pages.
    pub fn roles(self) -> &'static [Role] {
        match self {
            Access::Public => &[],
            Access::Roles(roles) => roles,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Access::Public)
    }

    /// Whether a viewer with `role` (or nobody, for `None`) may see the page.
    pub fn admits(self, role: Option<Role>) -> bool {
        match self {
            Access::Public => true,
            Access::Roles(roles) => role.is_some_and(|r| roles.contains(&r)),
        }
    }
}

/// A renderable view of the application.
///
/// Pages are opaque handles: rendering them is the job of whatever surface
/// sits on top of the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    Login,
    Unauthorized,
    Dashboard,
    Patients,
    Appointments,
    Prescriptions,
    MedicalServices,
    StaffDirectory,
    PatientProfile,
    Stocks,
    ClinicHistory,
    Reports,
    Chat,
    BookAppointment,
    PatientLanding,
    AboutUs,
    NursesByCampus,
    CompleteProfile,
    NotFound,
}

impl Page {
    /// Canonical path pattern. `NotFound` is the catch-all and has no path of its own.
    pub const fn path(self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Unauthorized => "/unauthorized",
            Page::Dashboard => "/dashboard",
            Page::Patients => "/patients",
            Page::Appointments => "/appointments",
            Page::Prescriptions => "/prescriptions",
            Page::MedicalServices => "/services",
            Page::StaffDirectory => "/staff",
            Page::PatientProfile => "/patient/{id}",
            Page::Stocks => "/stocks",
            Page::ClinicHistory => "/history",
            Page::Reports => "/reports",
            Page::Chat => "/chat",
            Page::BookAppointment => "/book-appointment",
            Page::PatientLanding => "/patient-landing",
            Page::AboutUs => "/about",
            Page::NursesByCampus => "/nurses-by-campus",
            Page::CompleteProfile => "/complete-profile",
            Page::NotFound => "*",
        }
    }

    pub const fn access(self) -> Access {
        match self {
            Page::Login | Page::Unauthorized | Page::NotFound => Access::Public,
            Page::Dashboard | Page::Chat => Access::Roles(STAFF),
            Page::Appointments
            | Page::PatientProfile
            | Page::ClinicHistory
            | Page::AboutUs => Access::Roles(EVERYONE),
            Page::Patients
            | Page::Prescriptions
            | Page::MedicalServices
            | Page::StaffDirectory
            | Page::Stocks
            | Page::Reports => Access::Roles(NURSES),
            Page::NursesByCampus => Access::Roles(DOCTORS),
            Page::BookAppointment | Page::PatientLanding | Page::CompleteProfile => {
                Access::Roles(PATIENTS)
            }
        }
    }

    /// Heading shown when the page renders.
    pub const fn title(self) -> &'static str {
        match self {
            Page::Login => "Sign In",
            Page::Unauthorized => "Access Denied",
            Page::Dashboard => "Dashboard",
            Page::Patients => "Patient Records",
            Page::Appointments => "Appointments",
            Page::Prescriptions => "Prescriptions",
            Page::MedicalServices => "Medical Services",
            Page::StaffDirectory => "Staff Directory",
            Page::PatientProfile => "Patient Profile",
            Page::Stocks => "Stocks",
            Page::ClinicHistory => "Clinic History",
            Page::Reports => "Reports",
            Page::Chat => "Chat",
            Page::BookAppointment => "Book Appointment",
            Page::PatientLanding => "Welcome",
            Page::AboutUs => "About Us",
            Page::NursesByCampus => "Nurses by Campus",
            Page::CompleteProfile => "Complete Your Profile",
            Page::NotFound => "Page Not Found",
        }
    }
}
