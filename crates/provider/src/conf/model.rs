//! Model — ProviderConfig and related structs.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHORITY: &str = "com.example.android.hilt.provider";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Authority every provider identifier is addressed under.
    pub authority: String,
    pub scheme: String,
    /// Buffered change notifications per observer before it lags.
    pub notify_capacity: usize,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
    /// Render timestamps in local time instead of UTC.
    pub local_time: bool,
    pub date_format: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authority: DEFAULT_AUTHORITY.to_string(),
            scheme: "content".to_string(),
            notify_capacity: 64,
            console: ConsoleConfig::default(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            local_time: true,
            date_format: crate::data::format::DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ProviderConfig {
    /// `{scheme}://{authority}/logs`
    pub fn logs_uri_string(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.authority, crate::route::LOGS_TABLE)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.authority.is_empty() {
            return Err("authority must not be empty".to_string());
        }
        if self.authority.contains('/') || self.authority.contains(char::is_whitespace) {
            return Err(format!("authority must be a bare host name: {:?}", self.authority));
        }
        if self.scheme.is_empty() || !self.scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
            return Err(format!("scheme is not valid: {:?}", self.scheme));
        }
        if self.notify_capacity == 0 {
            return Err("notify_capacity must be > 0".to_string());
        }
        if self.console.date_format.is_empty() {
            return Err("console.date_format must not be empty".to_string());
        }
        if StrftimeItems::new(&self.console.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "console.date_format is not a valid strftime pattern: {:?}",
                self.console.date_format
            ));
        }
        Ok(())
    }
}
