//! Format — human readable log timestamps.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// `d MMM yyyy HH:mm:ss`, e.g. `13 Sep 2020 12:26:40`.
pub const DEFAULT_DATE_FORMAT: &str = "%-d %b %Y %H:%M:%S";

#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: String,
    offset: Option<FixedOffset>,
}

impl DateFormatter {
    /// Render in the host's local time zone.
    pub fn local() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
            offset: None,
        }
    }

    /// Render in a fixed offset (UTC when `offset` is zero).
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
            offset: Some(offset),
        }
    }

    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Format a Unix millisecond timestamp. Out-of-range values, and
    /// patterns chrono cannot render, fall back to the raw number.
    pub fn format_date(&self, timestamp_millis: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp_millis) else {
            return timestamp_millis.to_string();
        };
        let mut out = String::new();
        let written = match self.offset {
            Some(offset) => write!(out, "{}", utc.with_timezone(&offset).format(&self.pattern)),
            None => write!(out, "{}", utc.with_timezone(&Local).format(&self.pattern)),
        };
        match written {
            Ok(()) => out,
            Err(_) => timestamp_millis.to_string(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::local()
    }
}
