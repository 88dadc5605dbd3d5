//! Memory — in-process log table.
//!
//! Rows are keyed by an auto-increment id starting at 1. Ids are never
//! reused, not even after `nuke_table`.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::data::model::Log;
use crate::store::traits::{LogCursor, LogStore, StoreError};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, Log>,
    next_id: i64,
    closed: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
            closed: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryLogStore {
    table: RwLock<Table>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row and return it with its assigned id.
    pub fn insert(&self, msg: &str, timestamp: i64) -> Result<Log, StoreError> {
        let mut table = self.table.write();
        if table.closed {
            return Err(StoreError::Closed);
        }
        let id = table.next_id;
        table.next_id += 1;

        let log = Log::new(id, msg, timestamp);
        table.rows.insert(id, log.clone());
        debug!(id, "inserted log row");
        Ok(log)
    }

    /// All rows, newest first.
    pub fn get_all(&self) -> Vec<Log> {
        self.table.read().rows.values().rev().cloned().collect()
    }

    /// Delete every row. Returns how many were removed.
    pub fn nuke_table(&self) -> Result<usize, StoreError> {
        let mut table = self.table.write();
        if table.closed {
            return Err(StoreError::Closed);
        }
        let removed = table.rows.len();
        table.rows.clear();
        debug!(removed, "cleared log table");
        Ok(removed)
    }

    /// Detach the data source. Reads return `None` from here on.
    pub fn close(&self) {
        self.table.write().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.table.read().closed
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }
}

impl LogStore for MemoryLogStore {
    fn select_all_logs(&self) -> Result<Option<LogCursor>, StoreError> {
        let table = self.table.read();
        if table.closed {
            return Ok(None);
        }
        Ok(Some(LogCursor::new(table.rows.values().rev().cloned().collect())))
    }

    fn select_log_by_id(&self, id: i64) -> Result<Option<LogCursor>, StoreError> {
        let table = self.table.read();
        if table.closed {
            return Ok(None);
        }
        let rows = table.rows.get(&id).cloned().into_iter().collect();
        Ok(Some(LogCursor::new(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = MemoryLogStore::new();
        let a = store.insert("a", 1).unwrap();
        let b = store.insert("b", 2).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_select_all_is_newest_first() {
        let store = MemoryLogStore::new();
        store.insert("first", 1).unwrap();
        store.insert("second", 2).unwrap();
        store.insert("third", 3).unwrap();

        let cursor = store.select_all_logs().unwrap().unwrap();
        let msgs: Vec<&str> = cursor.iter().map(|l| l.msg.as_str()).collect();
        assert_eq!(msgs, vec!["third", "second", "first"]);
        assert_eq!(store.get_all(), cursor.into_rows());
    }

    #[test]
    fn test_select_all_on_empty_table() {
        let store = MemoryLogStore::new();
        let cursor = store.select_all_logs().unwrap().unwrap();
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_select_by_id() {
        let store = MemoryLogStore::new();
        store.insert("a", 1).unwrap();
        let b = store.insert("b", 2).unwrap();

        let hit = store.select_log_by_id(b.id).unwrap().unwrap();
        assert_eq!(hit.rows(), &[b]);

        let miss = store.select_log_by_id(99).unwrap().unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn test_nuke_does_not_reuse_ids() {
        let store = MemoryLogStore::new();
        store.insert("a", 1).unwrap();
        store.insert("b", 2).unwrap();
        assert_eq!(store.nuke_table().unwrap(), 2);
        assert!(store.is_empty());

        let c = store.insert("c", 3).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_closed_store_has_no_data_source() {
        let store = MemoryLogStore::new();
        store.insert("a", 1).unwrap();
        store.close();

        assert!(store.is_closed());
        assert_eq!(store.select_all_logs().unwrap(), None);
        assert_eq!(store.select_log_by_id(1).unwrap(), None);
        assert_eq!(store.insert("b", 2), Err(StoreError::Closed));
        assert_eq!(store.nuke_table(), Err(StoreError::Closed));
    }
}
