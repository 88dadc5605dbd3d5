//! Traits — read interface over the log table and its cursor.

use thiserror::Error;

use crate::data::model::{Log, LOG_COLUMNS};
use crate::uri::ContentUri;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Log store is closed")]
    Closed,
    #[error("Log store unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the log table.
///
/// Both queries return `Ok(None)` when the store has no data source to read
/// from. Implementations must be `Send + Sync`; callers may query from
/// several threads at once.
#[cfg_attr(test, mockall::automock)]
pub trait LogStore: Send + Sync {
    /// All rows, newest (highest id) first.
    fn select_all_logs(&self) -> Result<Option<LogCursor>, StoreError>;

    /// Zero or one row.
    fn select_log_by_id(&self, id: i64) -> Result<Option<LogCursor>, StoreError>;
}

/// Owned row set returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogCursor {
    rows: Vec<Log>,
    notification_uri: Option<ContentUri>,
}

impl LogCursor {
    pub fn new(rows: Vec<Log>) -> Self {
        Self {
            rows,
            notification_uri: None,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &LOG_COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Log> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Log] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Log> {
        self.rows
    }

    /// Tag the cursor with the identifier whose changes invalidate it.
    pub fn set_notification_uri(&mut self, uri: ContentUri) {
        self.notification_uri = Some(uri);
    }

    pub fn notification_uri(&self) -> Option<&ContentUri> {
        self.notification_uri.as_ref()
    }
}

impl<'a> IntoIterator for &'a LogCursor {
    type Item = &'a Log;
    type IntoIter = std::slice::Iter<'a, Log>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_untagged() {
        let cursor = LogCursor::new(vec![Log::new(1, "a", 10)]);
        assert_eq!(cursor.len(), 1);
        assert!(cursor.notification_uri().is_none());
        assert_eq!(cursor.columns(), &["id", "msg", "timestamp"]);
    }

    #[test]
    fn test_cursor_tagging() {
        let mut cursor = LogCursor::default();
        let uri = ContentUri::parse("content://com.example.android.hilt.provider/logs").unwrap();
        cursor.set_notification_uri(uri.clone());
        assert!(cursor.is_empty());
        assert_eq!(cursor.notification_uri(), Some(&uri));
    }
}
