//! Content — parsed `scheme://authority/segment/...` identifiers.
//!
//! A [`ContentUri`] is immutable once built. Routing only looks at the
//! authority and the non-empty, percent-decoded path segments; the query
//! string and fragment are preserved for display but never matched against.

use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("Malformed URI: {0}")]
    Parse(#[from] url::ParseError),
    #[error("URI has no authority: {0}")]
    MissingAuthority(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    raw: String,
    scheme: String,
    authority: String,
    segments: Vec<String>,
    query: Option<String>,
}

impl ContentUri {
    /// Parse an identifier such as `content://com.example.provider/logs/42`.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let url = Url::parse(input.trim())?;

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host,
            _ => return Err(UriError::MissingAuthority(input.to_string())),
        };
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let segments: Vec<String> = url
            .path_segments()
            .map(|parts| {
                parts
                    .filter(|s| !s.is_empty())
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            raw: url.as_str().to_string(),
            scheme: url.scheme().to_string(),
            authority,
            segments,
            query: url.query().map(str::to_string),
        })
    }

    /// Build an identifier from its parts.
    pub fn build<I, S>(scheme: &str, authority: &str, segments: I) -> Result<Self, UriError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = format!("{}://{}", scheme, authority);
        for segment in segments {
            raw.push('/');
            raw.push_str(segment.as_ref());
        }
        Self::parse(&raw)
    }

    /// Append a numeric record id as a new trailing segment.
    /// Keeps the existing path text as written, drops query and fragment.
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        let base = self.raw.split(['?', '#']).next().unwrap_or(&self.raw);
        Self {
            raw: format!("{}/{}", base.trim_end_matches('/'), id),
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            segments,
            query: None,
        }
    }

    /// The trailing segment as a record id, if it is an integer.
    pub fn parse_id(&self) -> Option<i64> {
        self.segments.last().and_then(|s| s.parse().ok())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Non-empty path segments, decoded, in order.
    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when `other` lives strictly below this identifier.
    pub fn is_ancestor_of(&self, other: &ContentUri) -> bool {
        self.authority == other.authority
            && self.segments.len() < other.segments.len()
            && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for ContentUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
