//! Event types shared across the ingestion pipeline.

/// Originating tarpit family of an event.
///
/// A closed enumeration: lifecycle handling is parameterized over this type
/// instead of being duplicated per protocol. Tokens that name no known tarpit
/// map to [`ServerFamily::Other`] and never reach family-labeled series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerFamily {
    Telnet,
    Upnp,
    Mqtt,
    Coap,
    Ssh,
    Other,
}

impl ServerFamily {
    /// Maps a wire token to its family. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "Telnet" => Self::Telnet,
            "UPnP" => Self::Upnp,
            "MQTT" => Self::Mqtt,
            "CoAP" => Self::Coap,
            "SSH" => Self::Ssh,
            _ => Self::Other,
        }
    }

    /// The `server` label value for metric series, or `None` for families
    /// that must not create label values.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Telnet => Some("Telnet"),
            Self::Upnp => Some("UPnP"),
            Self::Mqtt => Some("MQTT"),
            Self::Coap => Some("CoAP"),
            Self::Ssh => Some("SSH"),
            Self::Other => None,
        }
    }

    /// The five families that carry connect/disconnect lifecycles.
    pub const KNOWN: [ServerFamily; 5] = [
        Self::Telnet,
        Self::Upnp,
        Self::Mqtt,
        Self::Coap,
        Self::Ssh,
    ];
}

/// One parsed notification line, borrowing from the received buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<'a> {
    pub family: ServerFamily,
    pub command: &'a str,
    /// Fields past the command, verbatim. Index meaning depends on `command`;
    /// argument semantics are validated by the dispatcher, not here.
    pub args: Vec<&'a str>,
}

impl<'a> Event<'a> {
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Optional argument with the historical single-space placeholder,
    /// preserving fixed label arity for series with optional fields.
    pub fn arg_or_blank(&self, index: usize) -> &'a str {
        self.arg(index).unwrap_or(" ")
    }
}
