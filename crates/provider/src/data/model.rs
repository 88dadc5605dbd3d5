//! Model — the log row.

use serde::{Deserialize, Serialize};

/// Column names, in row order.
pub const LOG_COLUMNS: [&str; 3] = ["id", "msg", "timestamp"];

/// One recorded interaction. `timestamp` is Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    pub msg: String,
    pub timestamp: i64,
}

impl Log {
    pub fn new(id: i64, msg: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            msg: msg.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_serializes_with_column_names() {
        let log = Log::new(3, "Interaction with 'Button 1'", 1_600_000_000_000);
        let value = serde_json::to_value(&log).unwrap();
        for column in LOG_COLUMNS {
            assert!(value.get(column).is_some(), "missing column {}", column);
        }
        assert_eq!(value["msg"], "Interaction with 'Button 1'");
    }
}
