//! ## tjara-telemetry::metrics
//! **Prometheus registry for the tarpit metric surface**
//!
//! The metric names and label sets below are a wire contract consumed by the
//! scrape side; changing either breaks downstream dashboards. One deviation
//! from the historical surface: the Prometheus data model allows no `-` in
//! metric names, so the two M-SEARCH series use `_` where the old exporter
//! used `M-Search`.
//!
//! Cardinality notes per series:
//! - `tarpitted_clients` carries country + capital coordinates instead of the
//!   source IP, bounding the series by the country count.
//! - the UPnP `ip`/`url` labels and the MQTT `topic`/`username`/`password`
//!   labels are raw attacker-controlled strings, an accepted trade-off these
//!   protocols require; the dispatcher can cap them (see the engine's label
//!   policy).

use prometheus::{IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct TarpitMetrics {
    pub registry: Registry,

    // Lifecycle, one series set per tarpit family.
    pub total_connects: IntCounterVec,
    pub total_trapped_time: IntCounterVec,
    pub active_clients: IntGaugeVec,
    pub tarpitted_clients: IntCounterVec,

    // UPnP decoy traffic.
    pub upnp_other_http_requests: IntCounterVec,
    pub upnp_m_search_requests: IntCounterVec,
    pub upnp_non_m_search_requests: IntCounterVec,

    // MQTT decoy traffic.
    pub mqtt_malformed_connects: IntCounter,
    pub mqtt_connect_versions: IntCounterVec,
    pub mqtt_subscribe_topics: IntCounterVec,
    pub mqtt_credentials: IntCounterVec,
    pub mqtt_publish_topics: IntCounterVec,
    pub mqtt_connacks: IntCounter,
    pub mqtt_unsubscribes: IntCounter,
    pub mqtt_pubrecs: IntCounter,

    // Operability: connects dropped because geolocation failed.
    pub geo_unresolved_lookups: IntCounter,
}

impl Default for TarpitMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TarpitMetrics {
    /// Builds and registers the full metric set on a fresh registry.
    ///
    /// # Panics
    /// If a metric name or label set is rejected by prometheus; the set is
    /// static, so this only fires on a programming error.
    pub fn new() -> Self {
        let registry = Registry::new();

        let total_connects = IntCounterVec::new(
            Opts::new("total_connects", "Total client connections"),
            &["server"],
        )
        .unwrap();
        let total_trapped_time = IntCounterVec::new(
            Opts::new("total_trapped_time_ms", "Total time clients were trapped (ms)"),
            &["server"],
        )
        .unwrap();
        let active_clients = IntGaugeVec::new(
            Opts::new("current_connected_clients", "Currently connected clients"),
            &["server"],
        )
        .unwrap();
        let tarpitted_clients = IntCounterVec::new(
            Opts::new("tarpitted_clients", "Connected clients"),
            &["server", "country", "latitude", "longitude"],
        )
        .unwrap();

        let upnp_other_http_requests = IntCounterVec::new(
            Opts::new(
                "upnp_other_http_requests",
                "Number of http requests that are not for the .xml file",
            ),
            &["method", "url"],
        )
        .unwrap();
        let upnp_m_search_requests = IntCounterVec::new(
            Opts::new("upnp_M_Search_requests", "Number of M-Search requests"),
            &["ip"],
        )
        .unwrap();
        let upnp_non_m_search_requests = IntCounterVec::new(
            Opts::new(
                "upnp_non_M_Search_requests",
                "Number of SSDP requests that are not M-SEARCH",
            ),
            &["ip"],
        )
        .unwrap();

        let mqtt_malformed_connects = IntCounter::new(
            "mqtt_pit_malformed_connects",
            "Malformed MQTT CONNECT packets received",
        )
        .unwrap();
        let mqtt_connect_versions = IntCounterVec::new(
            Opts::new("mqtt_pit_connect_versions", "MQTT CONNECT versions used by clients"),
            &["version"],
        )
        .unwrap();
        let mqtt_subscribe_topics = IntCounterVec::new(
            Opts::new("mqtt_pit_subscribe_topics", "MQTT SUBSCRIBE topics and QoS"),
            &["topic", "qos"],
        )
        .unwrap();
        let mqtt_credentials = IntCounterVec::new(
            Opts::new("mqtt_pit_credentials", "MQTT credentials used"),
            &["username", "password"],
        )
        .unwrap();
        let mqtt_publish_topics = IntCounterVec::new(
            Opts::new("mqtt_pit_publish_topics", "MQTT PUBLISH topic and QoS"),
            &["topic", "qos"],
        )
        .unwrap();
        let mqtt_connacks =
            IntCounter::new("mqtt_pit_connack_counter", "Total CONNACK requests for MQTT").unwrap();
        let mqtt_unsubscribes =
            IntCounter::new("mqtt_pit_unsub_counter", "Total UNSUBSCRIBE requests for MQTT")
                .unwrap();
        let mqtt_pubrecs =
            IntCounter::new("mqtt_pit_pubrec_counter", "Total PUBREC requests for MQTT").unwrap();

        let geo_unresolved_lookups = IntCounter::new(
            "geo_unresolved_lookups",
            "Connect events dropped because the source IP had no geolocation",
        )
        .unwrap();

        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(total_connects.clone()),
            Box::new(total_trapped_time.clone()),
            Box::new(active_clients.clone()),
            Box::new(tarpitted_clients.clone()),
            Box::new(upnp_other_http_requests.clone()),
            Box::new(upnp_m_search_requests.clone()),
            Box::new(upnp_non_m_search_requests.clone()),
            Box::new(mqtt_malformed_connects.clone()),
            Box::new(mqtt_connect_versions.clone()),
            Box::new(mqtt_subscribe_topics.clone()),
            Box::new(mqtt_credentials.clone()),
            Box::new(mqtt_publish_topics.clone()),
            Box::new(mqtt_connacks.clone()),
            Box::new(mqtt_unsubscribes.clone()),
            Box::new(mqtt_pubrecs.clone()),
            Box::new(geo_unresolved_lookups.clone()),
        ];
        for collector in collectors {
            registry.register(collector).unwrap();
        }

        Self {
            registry,
            total_connects,
            total_trapped_time,
            active_clients,
            tarpitted_clients,
            upnp_other_http_requests,
            upnp_m_search_requests,
            upnp_non_m_search_requests,
            mqtt_malformed_connects,
            mqtt_connect_versions,
            mqtt_subscribe_topics,
            mqtt_credentials,
            mqtt_publish_topics,
            mqtt_connacks,
            mqtt_unsubscribes,
            mqtt_pubrecs,
            geo_unresolved_lookups,
        }
    }

    /// Text-encodes the registry for the scrape endpoint.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
