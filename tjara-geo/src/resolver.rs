//! IP-to-country resolution against a MaxMind GeoLite2/GeoIP2 database.
//!
//! The resolver fails closed: any failure (unparseable literal, no record,
//! record without an ISO code) surfaces as a typed error so the dispatcher
//! can drop the enrichment instead of emitting a placeholder country.

use std::net::IpAddr;
use std::path::Path;

use anyhow::{Context, Result};
use maxminddb::{geoip2, Reader};
use thiserror::Error;

/// Lookup failures. The dispatcher treats every variant identically
/// (drop the enrichment); the distinction exists for logs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("`{0}` is not a parseable IP address")]
    InvalidAddress(String),
    #[error("no geolocation record for {0}")]
    LookupMiss(String),
}

/// Seam for injecting resolver doubles into the dispatcher.
pub trait CountryLookup {
    /// Maps an IP address literal to an ISO 3166-1 alpha-2 country code.
    fn country_code(&self, ip: &str) -> Result<String, GeoError>;
}

/// Country resolver over a memory-loaded MaxMind database.
///
/// Opened once at startup and injected where needed; there is no process-wide
/// database handle.
pub struct MaxmindResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxmindResolver {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).with_context(|| {
            format!("failed to open geolocation database at {}", path.display())
        })?;
        Ok(Self { reader })
    }
}

impl CountryLookup for MaxmindResolver {
    fn country_code(&self, ip: &str) -> Result<String, GeoError> {
        let addr: IpAddr = ip
            .parse()
            .map_err(|_| GeoError::InvalidAddress(ip.to_string()))?;

        let miss = || GeoError::LookupMiss(ip.to_string());
        let result = self.reader.lookup(addr).map_err(|_| miss())?;
        let record = result
            .decode::<geoip2::Country>()
            .ok()
            .flatten()
            .ok_or_else(miss)?;

        record
            .country
            .iso_code
            .map(str::to_string)
            .ok_or_else(miss)
    }
}
