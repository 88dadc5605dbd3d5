//! App — builds every component once and hands out shared references.
//!
//! Collaborators are passed in through constructors here; nothing looks its
//! dependencies up from ambient state.

use std::sync::Arc;

use crate::conf::ProviderConfig;
use crate::data::{DateFormatter, LoggerDataSource, LoggerLocalDataSource};
use crate::notify::NotificationHub;
use crate::provider::LogsProvider;
use crate::route::RouteTable;
use crate::store::MemoryLogStore;
use crate::uri::{ContentUri, UriError};

pub struct AppState {
    pub config: ProviderConfig,
    pub logs_uri: ContentUri,
    pub routes: Arc<RouteTable>,
    pub store: Arc<MemoryLogStore>,
    pub hub: Arc<NotificationHub>,
    pub logger: Arc<dyn LoggerDataSource>,
    pub provider: LogsProvider,
    pub formatter: DateFormatter,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: ProviderConfig) -> Result<Self, UriError> {
        let logs_uri = ContentUri::parse(&config.logs_uri_string())?;
        let routes = Arc::new(RouteTable::logs(&config.authority));
        let store = Arc::new(MemoryLogStore::new());
        let hub = Arc::new(NotificationHub::new(config.notify_capacity));

        let logger: Arc<dyn LoggerDataSource> = Arc::new(LoggerLocalDataSource::new(
            Arc::clone(&store),
            hub.clone(),
            logs_uri.clone(),
        ));
        let provider = LogsProvider::new(Arc::clone(&routes), store.clone(), hub.clone());

        let formatter = if config.console.local_time {
            DateFormatter::local()
        } else {
            DateFormatter::utc()
        }
        .pattern(config.console.date_format.clone());

        Ok(Self {
            config,
            logs_uri,
            routes,
            store,
            hub,
            logger,
            provider,
            formatter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::QueryArgs;

    #[test]
    fn test_logger_and_provider_share_the_store() {
        let state = AppState::new(ProviderConfig::default()).unwrap();
        assert!(state.provider.on_create());

        state.logger.add_log("Interaction with 'Button 3'").unwrap();

        let cursor = state
            .provider
            .query(&state.logs_uri, &QueryArgs::default())
            .unwrap()
            .unwrap();
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.rows()[0].msg, "Interaction with 'Button 3'");
        assert_eq!(state.hub.registrations(&state.logs_uri), 1);
    }

    #[test]
    fn test_routes_follow_configured_authority() {
        let config = ProviderConfig {
            authority: "org.example.logs".to_string(),
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.logs_uri.as_str(), "content://org.example.logs/logs");

        let default_uri = ContentUri::parse("content://com.example.android.hilt.provider/logs").unwrap();
        assert!(state.provider.query(&default_uri, &QueryArgs::default()).is_err());
        assert!(state.provider.query(&state.logs_uri, &QueryArgs::default()).is_ok());
    }

    #[tokio::test]
    async fn test_observer_wakes_on_add_log() {
        let state = AppState::new(ProviderConfig::default()).unwrap();
        let mut sub = state.hub.subscribe(state.logs_uri.clone(), true);

        state.logger.add_log("a").unwrap();
        assert_eq!(sub.changed().await, Some(state.logs_uri.clone()));
    }
}
