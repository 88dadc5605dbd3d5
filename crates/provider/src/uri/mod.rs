//! Uri module — content identifiers addressed by the provider.

pub mod content;

pub use content::{ContentUri, UriError};
