//! Tokenizer for the line-oriented notification format.
//!
//! Input is untrusted text from local tarpit processes. The parser only
//! guarantees field-count sufficiency (family token plus command); it never
//! interprets arguments.

use thiserror::Error;

use crate::event::{Event, ServerFamily};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("event line has {0} field(s), need at least a server and a command")]
    TooFewFields(usize),
}

/// Splits a raw line on ASCII whitespace into an [`Event`].
///
/// Callers drop the message on error and keep ingesting; a malformed line
/// must never stall the listener.
pub fn parse_event(line: &str) -> Result<Event<'_>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(ParseError::TooFewFields(fields.len()));
    }

    Ok(Event {
        family: ServerFamily::from_token(fields[0]),
        command: fields[1],
        args: fields[2..].to_vec(),
    })
}
