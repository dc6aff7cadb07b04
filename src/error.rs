//! Our error types for the Toellner PSU session.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error type for Toellner PSU communications.
///
/// The three failure classes map to distinct variants: transport faults
/// ([`Error::Serial`], [`Error::Io`]), reply decode faults
/// ([`Error::MissingField`], [`Error::MalformedField`]) and operations
/// attempted on a closed session ([`Error::NotConnected`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("reply has {count} field(s), no field at index {index}")]
    MissingField { index: usize, count: usize },
    #[error("reply field `{field}` is not a number")]
    MalformedField {
        field: String,
        source: std::num::ParseFloatError,
    },
    #[error("session is not connected")]
    NotConnected,
}

impl Error {
    /// Whether this error came out of the reply decoder rather than the transport.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. } | Error::MalformedField { .. }
        )
    }
}
