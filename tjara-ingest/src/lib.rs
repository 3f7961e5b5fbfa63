//! # tjara-ingest
//!
//! Unix datagram listener feeding the event pipeline. One datagram is one
//! event notification; there is no session state and no framing beyond the
//! datagram boundary.

pub mod listener;

pub use listener::IngestListener;
