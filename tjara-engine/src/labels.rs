//! Per-series admission policy for attacker-controlled label values.

use std::collections::{HashMap, HashSet};

use tjara_config::LabelConfig;

/// Label value recorded once a capped series has exhausted its budget.
pub const OVERFLOW_LABEL: &str = "_other";

/// Bounds the distinct values a high-cardinality label can take.
///
/// In raw mode every value passes through verbatim (the historical wire
/// contract). In capped mode each series admits up to `cap` distinct values;
/// later new values collapse into [`OVERFLOW_LABEL`], while already-admitted
/// values keep counting under their own label. Only called from the
/// single-threaded dispatch path, so plain collections suffice.
#[derive(Debug)]
pub struct LabelPolicy {
    raw: bool,
    cap: usize,
    admitted: HashMap<&'static str, HashSet<String>>,
}

impl LabelPolicy {
    pub fn new(config: &LabelConfig) -> Self {
        Self {
            raw: config.raw,
            cap: config.cardinality_cap,
            admitted: HashMap::new(),
        }
    }

    /// The label value to record for `value` on `series`.
    pub fn admit<'a>(&mut self, series: &'static str, value: &'a str) -> &'a str {
        if self.raw {
            return value;
        }

        let seen = self.admitted.entry(series).or_default();
        if seen.contains(value) {
            value
        } else if seen.len() < self.cap {
            seen.insert(value.to_string());
            value
        } else {
            OVERFLOW_LABEL
        }
    }
}
