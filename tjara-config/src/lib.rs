//! # Tjara Configuration System
//!
//! Hierarchical configuration for the tarpit telemetry exporter.
//!
//! Sources are merged in order: built-in defaults, `config/tjara.yaml`,
//! `config/<TJARA_ENV>.yaml`, then `TJARA_*` environment variables with `__`
//! separating nesting levels (e.g. `TJARA_INGEST__SOCKET_PATH`). The merged
//! result is validated before use.

#![warn(unsafe_code)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod exporter;
mod geo;
mod ingest;
mod labels;

pub use error::ConfigError;
pub use exporter::ExporterConfig;
pub use geo::GeoConfig;
pub use ingest::IngestConfig;
pub use labels::LabelConfig;

/// Top-level configuration container for the exporter.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct TjaraConfig {
    /// Datagram ingestion endpoint.
    #[validate(nested)]
    pub ingest: IngestConfig,

    /// Geolocation database.
    #[validate(nested)]
    pub geo: GeoConfig,

    /// Metrics scrape surface.
    #[validate(nested)]
    pub exporter: ExporterConfig,

    /// Label cardinality policy.
    #[validate(nested)]
    pub labels: LabelConfig,
}

impl TjaraConfig {
    /// Load configuration from default files and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(TjaraConfig::default()));

        if Path::new("config/tjara.yaml").exists() {
            figment = figment.merge(Yaml::file("config/tjara.yaml"));
        }

        if let Ok(env) = std::env::var("TJARA_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        figment
            .merge(Env::prefixed("TJARA_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(TjaraConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TJARA_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
