//! Scrape endpoint parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExporterConfig {
    /// TCP address the `/metrics` endpoint binds to.
    #[validate(length(min = 1))]
    pub listen_addr: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9101".to_string(),
        }
    }
}
