//! Runtime module — process lifecycle: boot and the interactive console.

pub mod boot;
pub mod console;
