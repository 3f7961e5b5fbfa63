//! # tjara-engine
//!
//! Wires the ingestion listener, event dispatcher and scrape surface into a
//! running exporter. The dispatcher owns every metric-shape decision; the
//! runtime owns task lifecycle and the fatal startup path.

pub mod dispatch;
pub mod error;
pub mod labels;
pub mod runtime;

pub use dispatch::EventDispatcher;
pub use error::EngineError;
pub use labels::LabelPolicy;
pub use runtime::ExporterRuntime;
