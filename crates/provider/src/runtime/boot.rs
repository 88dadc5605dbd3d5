//! Boot — logging init, config load, state creation.

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ProviderConfig;
use crate::state::{AppState, SharedState};

/// Initialise the tracing / logging subsystem. Output goes to stderr so it
/// stays out of the console's stdout.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logs_provider=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then wire the application state.
pub fn boot() -> Result<SharedState, Box<dyn std::error::Error>> {
    info!("Starting logs provider v{}", env!("CARGO_PKG_VERSION"));

    let config = ProviderConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;
    info!(
        "Loaded configuration: authority={}, scheme={}, notify_capacity={}",
        config.authority, config.scheme, config.notify_capacity
    );

    let state = AppState::new(config)?;
    if !state.provider.on_create() {
        return Err("logs provider failed to initialise".into());
    }
    info!("Provider serving {}", state.logs_uri);

    Ok(Arc::new(state))
}
