//! Source — the writers behind the buttons screen.
//!
//! [`LoggerLocalDataSource`] writes into the shared [`MemoryLogStore`] that
//! the provider reads from and announces every change on the logs
//! collection identifier. [`LoggerInMemoryDataSource`] keeps a private list
//! for the lifetime of one owner and tells nobody.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

use crate::data::model::Log;
use crate::notify::ChangeNotifier;
use crate::store::{MemoryLogStore, StoreError};
use crate::uri::ContentUri;

pub trait LoggerDataSource: Send + Sync {
    fn add_log(&self, msg: &str) -> Result<(), StoreError>;

    /// Newest first.
    fn get_all_logs(&self) -> Vec<Log>;

    fn remove_logs(&self) -> Result<(), StoreError>;
}

pub struct LoggerLocalDataSource {
    store: Arc<MemoryLogStore>,
    notifier: Arc<dyn ChangeNotifier>,
    logs_uri: ContentUri,
}

impl LoggerLocalDataSource {
    /// `logs_uri` is the collection identifier announced after each write.
    pub fn new(store: Arc<MemoryLogStore>, notifier: Arc<dyn ChangeNotifier>, logs_uri: ContentUri) -> Self {
        Self {
            store,
            notifier,
            logs_uri,
        }
    }
}

impl LoggerDataSource for LoggerLocalDataSource {
    fn add_log(&self, msg: &str) -> Result<(), StoreError> {
        let log = self.store.insert(msg, Utc::now().timestamp_millis())?;
        info!(id = log.id, msg = %log.msg, "log added");
        self.notifier.notify_change(&self.logs_uri);
        Ok(())
    }

    fn get_all_logs(&self) -> Vec<Log> {
        self.store.get_all()
    }

    fn remove_logs(&self) -> Result<(), StoreError> {
        let removed = self.store.nuke_table()?;
        info!(removed, "logs removed");
        self.notifier.notify_change(&self.logs_uri);
        Ok(())
    }
}

#[derive(Default)]
pub struct LoggerInMemoryDataSource {
    logs: Mutex<Vec<Log>>,
}

impl LoggerInMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoggerDataSource for LoggerInMemoryDataSource {
    fn add_log(&self, msg: &str) -> Result<(), StoreError> {
        let mut logs = self.logs.lock();
        let id = logs.len() as i64 + 1;
        logs.push(Log::new(id, msg, Utc::now().timestamp_millis()));
        Ok(())
    }

    fn get_all_logs(&self) -> Vec<Log> {
        self.logs.lock().iter().rev().cloned().collect()
    }

    fn remove_logs(&self) -> Result<(), StoreError> {
        self.logs.lock().clear();
        Ok(())
    }
}
