//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::ProviderConfig;

impl ProviderConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("PROVIDER_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/hilt-logs/provider.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ProviderConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Overlay `PROVIDER_*` environment variables. Unparseable numeric or
    /// boolean values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(authority) = lookup("PROVIDER_AUTHORITY") {
            self.authority = authority;
        }
        if let Some(scheme) = lookup("PROVIDER_SCHEME") {
            self.scheme = scheme;
        }
        if let Some(capacity) = lookup("PROVIDER_NOTIFY_CAPACITY").and_then(|s| s.parse().ok()) {
            self.notify_capacity = capacity;
        }
        if let Some(local_time) = lookup("PROVIDER_LOCAL_TIME").and_then(|s| s.parse().ok()) {
            self.console.local_time = local_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "authority = \"org.example.logs\"\nnotify_capacity = 8").unwrap();

        let cfg = ProviderConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.authority, "org.example.logs");
        assert_eq!(cfg.notify_capacity, 8);
        assert_eq!(cfg.scheme, "content");
    }

    #[test]
    fn test_from_file_missing() {
        assert!(ProviderConfig::from_file("/nonexistent/provider.toml").is_err());
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "notify_capacity = \"lots\"").unwrap();
        assert!(ProviderConfig::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PROVIDER_AUTHORITY", "net.example.audit"),
            ("PROVIDER_NOTIFY_CAPACITY", "16"),
            ("PROVIDER_LOCAL_TIME", "false"),
        ]);
        let mut cfg = ProviderConfig::default();
        cfg.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(cfg.authority, "net.example.audit");
        assert_eq!(cfg.notify_capacity, 16);
        assert!(!cfg.console.local_time);
        assert_eq!(cfg.scheme, "content");
    }

    #[test]
    fn test_unparseable_overrides_are_ignored() {
        let mut cfg = ProviderConfig::default();
        cfg.apply_overrides(|key| match key {
            "PROVIDER_NOTIFY_CAPACITY" => Some("many".to_string()),
            "PROVIDER_LOCAL_TIME" => Some("sometimes".to_string()),
            _ => None,
        });
        assert_eq!(cfg.notify_capacity, 64);
        assert!(cfg.console.local_time);
    }
}
