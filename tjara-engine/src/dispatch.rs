//! ## tjara-engine::dispatch
//! **Routes parsed events to the metric surface**
//!
//! The dispatcher is the only writer of metrics. Dispatch is best-effort and
//! at-most-once: an event that cannot be fully applied is dropped with a log
//! line and no partial metric mutation, and no failure ever escapes past
//! [`EventDispatcher::dispatch`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use tjara_core::{Event, ServerFamily};
use tjara_geo::{capital_coordinates, CountryLookup};
use tjara_telemetry::TarpitMetrics;

use crate::labels::LabelPolicy;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("`{command}` event is missing required field {index}")]
    MissingField { command: String, index: usize },
    #[error("`{0}` is not a non-negative trapped-time in milliseconds")]
    BadDuration(String),
}

/// Stateful event router. Single consumer of the ingestion stream; holds the
/// label admission state and the injected geolocation seam.
pub struct EventDispatcher {
    metrics: Arc<TarpitMetrics>,
    resolver: Box<dyn CountryLookup + Send>,
    labels: LabelPolicy,
}

impl EventDispatcher {
    pub fn new(
        metrics: Arc<TarpitMetrics>,
        resolver: Box<dyn CountryLookup + Send>,
        labels: LabelPolicy,
    ) -> Self {
        Self {
            metrics,
            resolver,
            labels,
        }
    }

    /// Applies one event to the metric surface. Never fails past this
    /// boundary; a rejected event is logged and dropped.
    pub fn dispatch(&mut self, event: &Event<'_>) {
        if let Err(e) = self.apply(event) {
            warn!(command = event.command, error = %e, "dropping event");
        }
    }

    fn apply(&mut self, event: &Event<'_>) -> Result<(), DispatchError> {
        let m = Arc::clone(&self.metrics);
        match event.command {
            // Lifecycle, shared by all five tarpit families.
            "connect" => self.handle_connect(event),
            "disconnect" => self.handle_disconnect(event),

            // UPnP decoy. Routed on the command alone: the family token is
            // not consulted for protocol-specific events.
            "otherHttpRequests" => {
                let method = event.arg_or_blank(0);
                let url = self.labels.admit("upnp_other_http_requests", event.arg_or_blank(1));
                m.upnp_other_http_requests
                    .with_label_values(&[method, url])
                    .inc();
                Ok(())
            }
            "M-SEARCH" => {
                let ip = self.labels.admit("upnp_M_Search_requests", required(event, 0)?);
                m.upnp_m_search_requests.with_label_values(&[ip]).inc();
                Ok(())
            }
            "non-M-SEARCH" => {
                let ip = self
                    .labels
                    .admit("upnp_non_M_Search_requests", required(event, 0)?);
                m.upnp_non_m_search_requests.with_label_values(&[ip]).inc();
                Ok(())
            }

            // MQTT decoy.
            "CONNECT" => {
                let version = required(event, 0)?;
                m.mqtt_connect_versions.with_label_values(&[version]).inc();
                Ok(())
            }
            "malformedConnect" => {
                m.mqtt_malformed_connects.inc();
                Ok(())
            }
            "SUBSCRIBE" => {
                let qos = required(event, 1)?;
                let topic = self.labels.admit("mqtt_pit_subscribe_topics", required(event, 0)?);
                m.mqtt_subscribe_topics
                    .with_label_values(&[topic, qos])
                    .inc();
                Ok(())
            }
            "credentials" => {
                let username = self.labels.admit("mqtt_pit_credentials", event.arg_or_blank(0));
                let password = self.labels.admit("mqtt_pit_credentials", event.arg_or_blank(1));
                m.mqtt_credentials
                    .with_label_values(&[username, password])
                    .inc();
                Ok(())
            }
            "PUBLISH" => {
                let qos = required(event, 1)?;
                let topic = self.labels.admit("mqtt_pit_publish_topics", required(event, 0)?);
                m.mqtt_publish_topics.with_label_values(&[topic, qos]).inc();
                Ok(())
            }
            "CONNACK" => {
                m.mqtt_connacks.inc();
                Ok(())
            }
            "UNSUBSCRIBE" => {
                m.mqtt_unsubscribes.inc();
                Ok(())
            }
            "PUBREC" => {
                m.mqtt_pubrecs.inc();
                Ok(())
            }

            // Unrecognized commands are the no-op transition.
            _ => Ok(()),
        }
    }

    fn handle_connect(&mut self, event: &Event<'_>) -> Result<(), DispatchError> {
        let Some(server) = event.family.label() else {
            debug!(command = event.command, "lifecycle event for unknown family, ignoring");
            return Ok(());
        };
        let ip = required(event, 0)?;

        // Failed enrichment drops the whole update instead of writing a
        // sentinel country into the geo-keyed series.
        let country = match self.resolver.country_code(ip) {
            Ok(country) => country,
            Err(e) => {
                debug!(ip, error = %e, "unresolvable connect, dropping");
                self.metrics.geo_unresolved_lookups.inc();
                return Ok(());
            }
        };

        let (lat, lon) = capital_coordinates(&country);
        self.metrics.total_connects.with_label_values(&[server]).inc();
        self.metrics.active_clients.with_label_values(&[server]).inc();
        self.metrics
            .tarpitted_clients
            .with_label_values(&[
                server,
                &country,
                &coordinate_label(lat),
                &coordinate_label(lon),
            ])
            .inc();
        Ok(())
    }

    fn handle_disconnect(&mut self, event: &Event<'_>) -> Result<(), DispatchError> {
        let Some(server) = event.family.label() else {
            debug!(command = event.command, "lifecycle event for unknown family, ignoring");
            return Ok(());
        };
        let raw = required(event, 0)?;
        let trapped_ms: u64 = raw
            .parse()
            .map_err(|_| DispatchError::BadDuration(raw.to_string()))?;

        // May transiently go negative under datagram loss; tolerated.
        self.metrics.active_clients.with_label_values(&[server]).dec();
        self.metrics
            .total_trapped_time
            .with_label_values(&[server])
            .inc_by(trapped_ms);
        Ok(())
    }
}

/// Coordinate label rendering. Debug formatting never drops the decimal
/// point, so integer-valued coordinates stay `"0.0"`/`"-77.0"` instead of
/// collapsing to `"0"`/`"-77"` and splitting the series.
fn coordinate_label(value: f64) -> String {
    format!("{value:?}")
}

fn required<'a>(event: &Event<'a>, index: usize) -> Result<&'a str, DispatchError> {
    event.arg(index).ok_or_else(|| DispatchError::MissingField {
        command: event.command.to_string(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tjara_config::LabelConfig;
    use tjara_core::parse_event;
    use tjara_geo::GeoError;

    struct StubResolver(HashMap<&'static str, &'static str>);

    impl CountryLookup for StubResolver {
        fn country_code(&self, ip: &str) -> Result<String, GeoError> {
            self.0
                .get(ip)
                .map(|cc| cc.to_string())
                .ok_or_else(|| GeoError::LookupMiss(ip.to_string()))
        }
    }

    fn dispatcher_with(
        entries: &[(&'static str, &'static str)],
        labels: LabelConfig,
    ) -> (Arc<TarpitMetrics>, EventDispatcher) {
        let metrics = Arc::new(TarpitMetrics::new());
        let resolver = StubResolver(entries.iter().copied().collect());
        let dispatcher = EventDispatcher::new(
            Arc::clone(&metrics),
            Box::new(resolver),
            LabelPolicy::new(&labels),
        );
        (metrics, dispatcher)
    }

    fn dispatcher(entries: &[(&'static str, &'static str)]) -> (Arc<TarpitMetrics>, EventDispatcher) {
        dispatcher_with(entries, LabelConfig::default())
    }

    fn feed(dispatcher: &mut EventDispatcher, line: &str) {
        let event = parse_event(line).unwrap();
        dispatcher.dispatch(&event);
    }

    #[test]
    fn connect_updates_all_three_lifecycle_series() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "US")]);
        feed(&mut d, "Telnet connect 203.0.113.7");

        assert_eq!(metrics.total_connects.with_label_values(&["Telnet"]).get(), 1);
        assert_eq!(metrics.active_clients.with_label_values(&["Telnet"]).get(), 1);
        assert_eq!(
            metrics
                .tarpitted_clients
                .with_label_values(&["Telnet", "US", "38.9072", "-77.0369"])
                .get(),
            1
        );
    }

    #[test]
    fn connect_then_disconnect_restores_the_gauge() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "SE")]);
        feed(&mut d, "SSH connect 203.0.113.7");
        assert_eq!(metrics.active_clients.with_label_values(&["SSH"]).get(), 1);

        feed(&mut d, "SSH disconnect 12500");
        assert_eq!(metrics.active_clients.with_label_values(&["SSH"]).get(), 0);
        assert_eq!(
            metrics.total_trapped_time.with_label_values(&["SSH"]).get(),
            12500
        );
        // total_connects is monotonic; the disconnect does not touch it.
        assert_eq!(metrics.total_connects.with_label_values(&["SSH"]).get(), 1);
    }

    #[test]
    fn each_family_gets_its_own_series() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "DE")]);
        for family in ["Telnet", "UPnP", "MQTT", "CoAP", "SSH"] {
            feed(&mut d, &format!("{family} connect 203.0.113.7"));
        }
        for family in ["Telnet", "UPnP", "MQTT", "CoAP", "SSH"] {
            assert_eq!(metrics.total_connects.with_label_values(&[family]).get(), 1);
        }
    }

    #[test]
    fn unresolvable_connect_mutates_nothing_but_the_drop_counter() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "Telnet connect 198.51.100.9");
        feed(&mut d, "Telnet connect not-an-ip");

        assert_eq!(metrics.total_connects.with_label_values(&["Telnet"]).get(), 0);
        assert_eq!(metrics.active_clients.with_label_values(&["Telnet"]).get(), 0);
        assert_eq!(metrics.geo_unresolved_lookups.get(), 2);
    }

    #[test]
    fn country_without_capital_entry_maps_to_origin() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "XX")]);
        feed(&mut d, "CoAP connect 203.0.113.7");
        assert_eq!(
            metrics
                .tarpitted_clients
                .with_label_values(&["CoAP", "XX", "0.0", "0.0"])
                .get(),
            1
        );
        // No bare-integer rendering of the coordinate pair exists.
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("latitude=\"0.0\""));
        assert!(!text.contains("latitude=\"0\""));
    }

    #[test]
    fn integer_valued_coordinates_keep_their_decimal_point() {
        assert_eq!(coordinate_label(0.0), "0.0");
        assert_eq!(coordinate_label(-77.0), "-77.0");
        assert_eq!(coordinate_label(38.9), "38.9");
        assert_eq!(coordinate_label(59.3293), "59.3293");
    }

    #[test]
    fn unknown_family_lifecycle_is_inert() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "US")]);
        feed(&mut d, "FTP connect 203.0.113.7");
        feed(&mut d, "FTP disconnect 100");
        let text = metrics.gather_metrics().unwrap();
        assert!(!text.contains('{'), "no labeled series should exist: {text}");
        // The resolver is never consulted for unknown families.
        assert_eq!(metrics.geo_unresolved_lookups.get(), 0);
    }

    #[test]
    fn non_numeric_disconnect_is_dropped() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "MQTT disconnect soon");
        feed(&mut d, "MQTT disconnect -5");
        assert_eq!(metrics.active_clients.with_label_values(&["MQTT"]).get(), 0);
        assert_eq!(metrics.total_trapped_time.with_label_values(&["MQTT"]).get(), 0);
    }

    #[test]
    fn disconnect_without_prior_connect_may_go_negative() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "UPnP disconnect 40");
        assert_eq!(metrics.active_clients.with_label_values(&["UPnP"]).get(), -1);
    }

    #[test]
    fn connack_touches_exactly_its_counter() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "MQTT CONNACK");
        assert_eq!(metrics.mqtt_connacks.get(), 1);
        assert_eq!(metrics.mqtt_unsubscribes.get(), 0);
        assert_eq!(metrics.mqtt_pubrecs.get(), 0);
        assert_eq!(metrics.total_connects.with_label_values(&["MQTT"]).get(), 0);
    }

    #[test]
    fn protocol_commands_ignore_the_family_token() {
        let (metrics, mut d) = dispatcher(&[]);
        // The family token is bogus; the command still routes.
        feed(&mut d, "whatever CONNACK");
        feed(&mut d, "Telnet UNSUBSCRIBE");
        feed(&mut d, "MQTT PUBREC");
        assert_eq!(metrics.mqtt_connacks.get(), 1);
        assert_eq!(metrics.mqtt_unsubscribes.get(), 1);
        assert_eq!(metrics.mqtt_pubrecs.get(), 1);
    }

    #[test]
    fn optional_http_fields_default_to_blank() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "UPnP otherHttpRequests");
        feed(&mut d, "UPnP otherHttpRequests POST");
        feed(&mut d, "UPnP otherHttpRequests POST /setup.cgi");

        assert_eq!(
            metrics.upnp_other_http_requests.with_label_values(&[" ", " "]).get(),
            1
        );
        assert_eq!(
            metrics.upnp_other_http_requests.with_label_values(&["POST", " "]).get(),
            1
        );
        assert_eq!(
            metrics
                .upnp_other_http_requests
                .with_label_values(&["POST", "/setup.cgi"])
                .get(),
            1
        );
    }

    #[test]
    fn credentials_default_to_blank_placeholders() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "MQTT credentials admin");
        assert_eq!(
            metrics.mqtt_credentials.with_label_values(&["admin", " "]).get(),
            1
        );
    }

    #[test]
    fn subscribe_and_publish_require_topic_and_qos() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "MQTT SUBSCRIBE home/temp 1");
        feed(&mut d, "MQTT SUBSCRIBE lonely");
        feed(&mut d, "MQTT PUBLISH home/temp 0");

        assert_eq!(
            metrics.mqtt_subscribe_topics.with_label_values(&["home/temp", "1"]).get(),
            1
        );
        assert_eq!(
            metrics.mqtt_subscribe_topics.with_label_values(&["lonely", " "]).get(),
            0
        );
        assert_eq!(
            metrics.mqtt_publish_topics.with_label_values(&["home/temp", "0"]).get(),
            1
        );
    }

    #[test]
    fn msearch_counters_track_source_ip() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "UPnP M-SEARCH 198.51.100.4");
        feed(&mut d, "UPnP M-SEARCH 198.51.100.4");
        feed(&mut d, "UPnP non-M-SEARCH 198.51.100.5");

        assert_eq!(
            metrics.upnp_m_search_requests.with_label_values(&["198.51.100.4"]).get(),
            2
        );
        assert_eq!(
            metrics.upnp_non_m_search_requests.with_label_values(&["198.51.100.5"]).get(),
            1
        );
    }

    #[test]
    fn unrecognized_command_is_silently_ignored() {
        let (metrics, mut d) = dispatcher(&[("203.0.113.7", "US")]);
        feed(&mut d, "Telnet reboot now");
        let text = metrics.gather_metrics().unwrap();
        assert!(!text.contains('{'), "no labeled series should exist: {text}");
    }

    #[test]
    fn capped_mode_bounds_topic_cardinality() {
        let labels = LabelConfig {
            raw: false,
            cardinality_cap: 2,
        };
        let (metrics, mut d) = dispatcher_with(&[], labels);
        feed(&mut d, "MQTT SUBSCRIBE a 0");
        feed(&mut d, "MQTT SUBSCRIBE b 0");
        feed(&mut d, "MQTT SUBSCRIBE c 0");
        feed(&mut d, "MQTT SUBSCRIBE d 0");

        assert_eq!(
            metrics.mqtt_subscribe_topics.with_label_values(&["_other", "0"]).get(),
            2
        );
        assert_eq!(metrics.mqtt_subscribe_topics.with_label_values(&["a", "0"]).get(), 1);
    }

    #[test]
    fn mqtt_connect_version_is_required() {
        let (metrics, mut d) = dispatcher(&[]);
        feed(&mut d, "MQTT CONNECT 4");
        feed(&mut d, "MQTT CONNECT");
        assert_eq!(metrics.mqtt_connect_versions.with_label_values(&["4"]).get(), 1);
    }
}
