// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The route table: path patterns mapped to pages.

use hsms_core::{HsmsError, Role};
use strum::IntoEnumIterator;

use crate::page::{Access, Page};
use crate::pattern::{Params, RoutePattern, normalize};

/// Errors detected while assembling a route table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route {first} and route {second} match the same paths")]
    Ambiguous { first: String, second: String },

    #[error("route {pattern} is protected but admits no role")]
    NoRoles { pattern: String },

    #[error("the not-found page cannot be bound to route {pattern}")]
    CatchAllBound { pattern: String },
}

impl From<RouteTableError> for HsmsError {
    fn from(err: RouteTableError) -> Self {
        HsmsError::Config(format!("route table: {err}"))
    }
}

/// One path pattern and the page it renders.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: RoutePattern,
    page: Page,
}

impl RouteEntry {
    pub fn new(pattern: &str, page: Page) -> Self {
        Self {
            pattern: RoutePattern::new(pattern),
            page,
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn access(&self) -> Access {
        self.page.access()
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        self.page.access().roles()
    }
}

/// Result of matching a path against the table.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    Matched {
        entry: &'a RouteEntry,
        params: Params,
    },
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds a table, rejecting entries that could never be told apart.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.page == Page::NotFound {
                return Err(RouteTableError::CatchAllBound {
                    pattern: entry.pattern.to_string(),
                });
            }
            if let Access::Roles(roles) = entry.access()
                && roles.is_empty()
            {
                return Err(RouteTableError::NoRoles {
                    pattern: entry.pattern.to_string(),
                });
            }
            if let Some(earlier) = entries[..i]
                .iter()
                .find(|e| e.pattern.same_shape(&entry.pattern))
            {
                return Err(RouteTableError::Ambiguous {
                    first: earlier.pattern.to_string(),
                    second: entry.pattern.to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The application's routes: `/` for the dashboard, then every page at
    /// its canonical path.
    pub fn standard() -> Result<Self, RouteTableError> {
        let entries = std::iter::once(RouteEntry::new("/", Page::Dashboard))
            .chain(
                Page::iter()
                    .filter(|page| *page != Page::NotFound)
                    .map(|page| RouteEntry::new(page.path(), page)),
            )
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Finds the entry for `path`.
    ///
    /// When several patterns match, the one with the fewest parameters wins,
    /// and among equals the one declared first.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let segments = normalize(path);
        self.entries
            .iter()
            .filter_map(|entry| entry.pattern.matches(&segments).map(|p| (entry, p)))
            .min_by_key(|(entry, _)| entry.pattern.param_count())
            .map_or(Resolution::NotFound, |(entry, params)| Resolution::Matched {
                entry,
                params,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_for(table: &RouteTable, path: &str) -> Option<Page> {
        match table.resolve(path) {
            Resolution::Matched { entry, .. } => Some(entry.page()),
            Resolution::NotFound => None,
        }
    }

    #[test]
    fn standard_table_builds() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(table.entries().len(), 19);
        assert_eq!(table.entries()[0].pattern().as_str(), "/");
    }

    #[test]
    fn root_and_dashboard_share_a_page() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(page_for(&table, "/"), Some(Page::Dashboard));
        assert_eq!(page_for(&table, ""), Some(Page::Dashboard));
        assert_eq!(page_for(&table, "/dashboard/"), Some(Page::Dashboard));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(page_for(&table, "/xyz"), None);
        assert_eq!(page_for(&table, "/patient"), None);
        assert_eq!(page_for(&table, "/patient/42/notes"), None);
    }

    #[test]
    fn profile_binds_id() {
        let table = RouteTable::standard().unwrap();
        let Resolution::Matched { entry, params } = table.resolve("/patient/42?tab=notes") else {
            panic!("expected a match");
        };
        assert_eq!(entry.page(), Page::PatientProfile);
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn static_route_beats_param_route_regardless_of_order() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/patient/{id}", Page::PatientProfile),
            RouteEntry::new("/patient/new", Page::BookAppointment),
        ])
        .unwrap();
        assert_eq!(page_for(&table, "/patient/new"), Some(Page::BookAppointment));
        assert_eq!(page_for(&table, "/patient/7"), Some(Page::PatientProfile));
    }

    #[test]
    fn equal_specificity_falls_back_to_declaration_order() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/patient/{id}", Page::PatientProfile),
            RouteEntry::new("/{section}/42", Page::Reports),
        ])
        .unwrap();
        assert_eq!(page_for(&table, "/patient/42"), Some(Page::PatientProfile));
    }

    #[test]
    fn duplicate_shapes_are_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/patient/{id}", Page::PatientProfile),
            RouteEntry::new("/patient/{other}", Page::Reports),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteTableError::Ambiguous { .. }));
    }

    #[test]
    fn table_errors_surface_as_config_errors() {
        let err: HsmsError = RouteTableError::NoRoles {
            pattern: "/x".into(),
        }
        .into();
        assert!(matches!(err, HsmsError::Config(ref m) if m.contains("/x")));
    }

    #[test]
    fn not_found_page_cannot_be_routed() {
        let err = RouteTable::new(vec![RouteEntry::new("/missing", Page::NotFound)]).unwrap_err();
        assert_eq!(
            err,
            RouteTableError::CatchAllBound {
                pattern: "/missing".into()
            }
        );
    }
}
