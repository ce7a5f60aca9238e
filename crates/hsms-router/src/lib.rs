// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing for the HSMS clinic application.
//!
//! A request path is resolved against the [`RouteTable`], checked by the
//! authorization gate ([`authorize`]) and turned into a [`Navigation`] by the
//! [`Navigator`]. The navigation menu is projected from the same [`Page`]
//! declarations so menu and routes never disagree about who sees what.

pub mod gate;
pub mod menu;
pub mod navigator;
pub mod page;
pub mod pattern;
pub mod table;

pub use gate::{GateDecision, authorize, denied_fallback};
pub use menu::{MENU, MenuEntry, project, project_menu};
pub use navigator::{Navigation, Navigator, RedirectReason, landing_page};
pub use page::{Access, Page};
pub use pattern::{Params, RoutePattern, normalize};
pub use table::{Resolution, RouteEntry, RouteTable, RouteTableError};
