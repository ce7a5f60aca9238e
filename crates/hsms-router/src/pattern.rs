// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path patterns with named `{param}` segments.

use std::collections::BTreeMap;
use std::fmt;

/// Splits a request path into its significant segments.
///
/// The query string and fragment are dropped. Empty segments (leading,
/// trailing, or repeated slashes) are skipped, so `""`, `"/"` and `"//"` all
/// normalize to no segments at all.
pub fn normalize(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A route pattern such as `/patient/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn new(pattern: &str) -> Self {
        let segments = normalize(pattern)
            .into_iter()
            .map(|seg| match seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Static(seg.to_string()),
            })
            .collect();
        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of `{param}` segments. Fewer means more specific.
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Two patterns with the same shape would match exactly the same paths.
    pub(crate) fn same_shape(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Matches already-normalized segments, binding parameters by name.
    pub fn matches(&self, segments: &[&str]) -> Option<Params> {
        if segments.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::default();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Static(lit) if lit == actual => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.0.insert(name.clone(), (*actual).to_string());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parameters bound while matching a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
