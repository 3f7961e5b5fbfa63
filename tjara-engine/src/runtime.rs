//! Exporter runtime: ingestion task plus scrape surface.
//!
//! Two long-lived tasks run for the life of the process. The ingestion loop
//! is strictly sequential (one datagram parsed and dispatched at a time); the
//! scrape endpoint only reads the shared registry, whose primitives are
//! atomic. Nothing else is shared, so no locking is added here.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use tjara_config::TjaraConfig;
use tjara_core::parse_event;
use tjara_geo::{CountryLookup, MaxmindResolver};
use tjara_ingest::IngestListener;
use tjara_telemetry::TarpitMetrics;

use crate::dispatch::EventDispatcher;
use crate::error::EngineError;
use crate::labels::LabelPolicy;

pub struct ExporterRuntime {
    config: TjaraConfig,
    metrics: Arc<TarpitMetrics>,
}

impl ExporterRuntime {
    pub fn new(config: TjaraConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(TarpitMetrics::new()),
        }
    }

    /// Shared handle to the metric surface, usable before and during `run`.
    pub fn metrics(&self) -> Arc<TarpitMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Opens the geolocation database and runs the exporter. Startup errors
    /// (database, socket bind, listen address) are fatal; everything after
    /// startup is drop-and-continue.
    pub async fn run(self) -> Result<(), EngineError> {
        let resolver = MaxmindResolver::open(&self.config.geo.database_path)
            .map_err(|e| EngineError::Geo(format!("{e:#}")))?;
        self.run_with_resolver(Box::new(resolver)).await
    }

    /// Runs with an injected resolver; the seam tests use for doubles.
    pub async fn run_with_resolver(
        self,
        resolver: Box<dyn CountryLookup + Send>,
    ) -> Result<(), EngineError> {
        let listener = IngestListener::bind(
            &self.config.ingest.socket_path,
            self.config.ingest.max_datagram_bytes,
        )?;

        let mut dispatcher = EventDispatcher::new(
            Arc::clone(&self.metrics),
            resolver,
            LabelPolicy::new(&self.config.labels),
        );

        let ingest = tokio::spawn(listener.run(move |line| match parse_event(line) {
            Ok(event) => dispatcher.dispatch(&event),
            Err(e) => warn!(error = %e, "dropping malformed line"),
        }));

        let app = Router::new()
            .route("/metrics", get(scrape))
            .with_state(Arc::clone(&self.metrics));
        let tcp = TcpListener::bind(&self.config.exporter.listen_addr).await?;
        info!(
            addr = %self.config.exporter.listen_addr,
            socket = %self.config.ingest.socket_path.display(),
            "exporter running"
        );

        tokio::select! {
            served = axum::serve(tcp, app) => {
                error!("scrape surface terminated");
                served.map_err(EngineError::Io)
            }
            joined = ingest => {
                error!("ingestion task terminated");
                match joined {
                    Ok(result) => result.map_err(EngineError::Io),
                    Err(e) => Err(EngineError::Io(std::io::Error::other(e))),
                }
            }
        }
    }
}

async fn scrape(State(metrics): State<Arc<TarpitMetrics>>) -> impl IntoResponse {
    match metrics.gather_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "metric encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
