//! Notify module — change notification between writers and observers.

pub mod hub;

pub use hub::{ChangeNotifier, ChangeSubscription, NotificationHub, DEFAULT_REGISTRATION_LIMIT};
