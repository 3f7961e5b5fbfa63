//! Label cardinality policy parameters.
//!
//! The UPnP and MQTT series carry attacker-controlled label values (source
//! IPs, URLs, topics, credentials). Raw mode preserves the historical wire
//! contract; capped mode bounds each such series to a fixed number of
//! distinct values, collapsing the overflow into a sentinel label.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LabelConfig {
    /// Pass attacker-controlled label values through verbatim.
    pub raw: bool,

    /// Distinct values admitted per capped series before new values collapse
    /// into the overflow label. Ignored in raw mode.
    #[validate(range(min = 1))]
    pub cardinality_cap: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            raw: true,
            cardinality_cap: 512,
        }
    }
}
