//! # tjara-core
//!
//! Event model and wire-line parser for the tarpit telemetry aggregator.
//! Everything here is transient: one received line becomes one [`Event`],
//! which is dispatched and dropped.

pub mod event;
pub mod parser;

pub use event::{Event, ServerFamily};
pub use parser::{parse_event, ParseError};
