//! Geolocation database parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GeoConfig {
    /// Path to a MaxMind GeoLite2/GeoIP2 country database.
    pub database_path: PathBuf,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("GeoLite2-Country.mmdb"),
        }
    }
}
