// Domain-driven module structure for the logs provider.

// Core
pub mod uri;
pub mod route;
pub mod store;
pub mod notify;
pub mod provider;

// Application
pub mod data;
pub mod conf;
pub mod state;
pub mod runtime;
