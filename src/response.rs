//! Decoding of raw device replies.
//!
//! The supply answers a multi-query request with semicolon-delimited fields in the same
//! order the queries were sent. There is no labelling on the wire, so decoding is purely
//! positional.

use crate::error::{Error, Result};
use crate::types::Measurement;

/// Decode one field of a measure-all reply.
///
/// Splits `reply` on `;` and parses the field at the target's ordinal as a decimal number.
/// Fields are trimmed of surrounding whitespace and line terminators before parsing; the
/// radix is always the decimal point, independent of host locale.
pub fn field(reply: &str, target: Measurement) -> Result<f64> {
    let index = target.index();
    let Some(raw) = reply.split(';').nth(index) else {
        return Err(Error::MissingField {
            index,
            count: reply.split(';').count(),
        });
    };

    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|source| Error::MalformedField {
        field: trimmed.to_owned(),
        source,
    })
}
