//! Store module — the log table the provider reads from.
//!
//! `traits.rs` defines the read interface, `memory.rs` the in-process table
//! and `fake.rs` a recording test double.

pub mod fake;
pub mod memory;
pub mod traits;

pub use fake::{FakeLogStore, StoreCall};
pub use memory::MemoryLogStore;
pub use traits::{LogCursor, LogStore, StoreError};
