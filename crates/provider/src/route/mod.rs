//! Route module — URI pattern table and route codes.

pub mod table;

pub use table::{PatternSegment, RouteCode, RoutePattern, RouteTable, LOGS_TABLE};
