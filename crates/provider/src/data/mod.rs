//! Data module — log records, formatting, and the logger data sources.

pub mod format;
pub mod model;
pub mod source;

pub use format::DateFormatter;
pub use model::Log;
pub use source::{LoggerDataSource, LoggerInMemoryDataSource, LoggerLocalDataSource};
