//! # tjara-geo
//!
//! Geolocation enrichment for connection events: an IP-to-country resolver
//! backed by a MaxMind database, plus the static country-capital coordinate
//! table used to keep the `tarpitted_clients` series at country granularity.

pub mod capitals;
pub mod resolver;

pub use capitals::capital_coordinates;
pub use resolver::{CountryLookup, GeoError, MaxmindResolver};
