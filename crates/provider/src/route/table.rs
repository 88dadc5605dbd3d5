//! Table — ordered list of URI patterns mapped to route codes.
//!
//! Pattern paths use `#` for a numeric segment and `*` for any single
//! segment. Every other segment is matched literally. Matching is exact on
//! the authority and on the segment count; the first pattern that matches
//! wins and anything else is `None`.

use std::fmt;

use crate::uri::ContentUri;

/// Table name exposed by the provider.
pub const LOGS_TABLE: &str = "logs";

/// Handling code for a matched identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCode {
    /// `{authority}/logs`
    Logs,
    /// `{authority}/logs/#`
    LogId,
}

impl RouteCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCode::Logs => "logs",
            RouteCode::LogId => "log_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    /// `#` — ASCII digits that fit an `i64`.
    Number,
    /// `*` — any one segment.
    Text,
}

impl PatternSegment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            PatternSegment::Literal(lit) => lit == segment,
            PatternSegment::Number => {
                !segment.is_empty()
                    && segment.bytes().all(|b| b.is_ascii_digit())
                    && segment.parse::<i64>().is_ok()
            }
            PatternSegment::Text => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    authority: String,
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    /// `path` is slash separated, e.g. `logs/#`.
    pub fn new(authority: &str, path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "#" => PatternSegment::Number,
                "*" => PatternSegment::Text,
                lit => PatternSegment::Literal(lit.to_string()),
            })
            .collect();

        Self {
            authority: authority.to_string(),
            segments,
        }
    }

    pub fn matches(&self, uri: &ContentUri) -> bool {
        let path = uri.path_segments();
        uri.authority() == self.authority
            && path.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(path)
                .all(|(pattern, segment)| pattern.matches(segment))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority)?;
        for segment in &self.segments {
            match segment {
                PatternSegment::Literal(lit) => write!(f, "/{}", lit)?,
                PatternSegment::Number => f.write_str("/#")?,
                PatternSegment::Text => f.write_str("/*")?,
            }
        }
        Ok(())
    }
}

/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(RoutePattern, RouteCode)>,
}

impl RouteTable {
    pub fn new(routes: Vec<(RoutePattern, RouteCode)>) -> Self {
        Self { routes }
    }

    /// The two routes served by the logs provider.
    pub fn logs(authority: &str) -> Self {
        Self::new(vec![
            (RoutePattern::new(authority, LOGS_TABLE), RouteCode::Logs),
            (RoutePattern::new(authority, &format!("{}/#", LOGS_TABLE)), RouteCode::LogId),
        ])
    }

    pub fn match_uri(&self, uri: &ContentUri) -> Option<RouteCode> {
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.matches(uri))
            .map(|(_, code)| *code)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RoutePattern, RouteCode)> {
        self.routes.iter()
    }
}
