//! State module — the wired application graph.

pub mod app;

pub use app::{AppState, SharedState};
