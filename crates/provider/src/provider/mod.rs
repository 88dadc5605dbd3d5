//! Provider module — the read-only logs content provider.

pub mod error;
pub mod logs;

pub use error::{Operation, ProviderError};
pub use logs::{ContentValues, LogsProvider, QueryArgs};
