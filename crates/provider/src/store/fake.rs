//! Fake — recording test double for [`LogStore`].
//!
//! Serves canned rows and remembers every call so tests can assert which
//! query the provider dispatched to, or that the store was never touched.

use parking_lot::Mutex;

use crate::data::model::Log;
use crate::store::traits::{LogCursor, LogStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    SelectAll,
    SelectById(i64),
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Log>,
    calls: Vec<StoreCall>,
    unavailable: bool,
    failure: Option<StoreError>,
}

#[derive(Debug, Default)]
pub struct FakeLogStore {
    inner: Mutex<Inner>,
}

impl FakeLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows, kept in the order given.
    pub fn with_rows(rows: Vec<Log>) -> Self {
        let fake = Self::new();
        fake.inner.lock().rows = rows;
        fake
    }

    /// Report "no data source" on every query.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    /// Fail every query with `err`.
    pub fn fail_with(&self, err: StoreError) {
        self.inner.lock().failure = Some(err);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    fn answer(&self, call: StoreCall) -> Result<Option<LogCursor>, StoreError> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);

        if let Some(err) = &inner.failure {
            return Err(err.clone());
        }
        if inner.unavailable {
            return Ok(None);
        }

        let rows = match call {
            StoreCall::SelectAll => inner.rows.clone(),
            StoreCall::SelectById(id) => inner.rows.iter().filter(|l| l.id == id).cloned().collect(),
        };
        Ok(Some(LogCursor::new(rows)))
    }
}

impl LogStore for FakeLogStore {
    fn select_all_logs(&self) -> Result<Option<LogCursor>, StoreError> {
        self.answer(StoreCall::SelectAll)
    }

    fn select_log_by_id(&self, id: i64) -> Result<Option<LogCursor>, StoreError> {
        self.answer(StoreCall::SelectById(id))
    }
}
