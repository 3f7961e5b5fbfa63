//! Datagram ingestion parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ingestion socket configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IngestConfig {
    /// Filesystem path of the unix datagram socket the tarpits write to.
    pub socket_path: PathBuf,

    /// Receive buffer size. Datagrams larger than this are truncated, never
    /// rejected.
    #[validate(range(min = 64, max = 65536))]
    pub max_datagram_bytes: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from("/tmp/tarpit_exporter.sock"),
            max_datagram_bytes: 1024,
        }
    }
}
