//! This module contains the typed vocabulary used to address the PSU.

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The physical output terminals of the TOE 8952.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Output {
    /// First output terminal.
    Out1,
    /// Second output terminal.
    Out2,
}

impl Output {
    /// The on-wire instrument-select token for this output.
    pub fn token(self) -> &'static str {
        match self {
            Output::Out1 => "OUT1",
            Output::Out2 => "OUT2",
        }
    }

    /// Names of all known outputs, in wire-token form.
    pub fn names() -> Vec<&'static str> {
        Output::iter().map(Output::token).collect()
    }
}

/// Identifies the output a command addresses.
///
/// Commands accept either a typed [`Output`] or a caller-supplied name for supplies with
/// differently labelled terminals. Both forms render to the identical wire token and flow
/// through the same builders, so numeric formatting does not depend on which form was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Output(Output),
    Named(String),
}

impl Channel {
    /// The on-wire token placed after `:INST`.
    pub fn token(&self) -> &str {
        match self {
            Channel::Output(output) => output.token(),
            Channel::Named(name) => name,
        }
    }
}

impl From<Output> for Channel {
    fn from(value: Output) -> Self {
        Channel::Output(value)
    }
}

impl From<&str> for Channel {
    fn from(value: &str) -> Self {
        Channel::Named(value.to_owned())
    }
}

impl From<String> for Channel {
    fn from(value: String) -> Self {
        Channel::Named(value)
    }
}

/// Selects which field of a measure-all reply to decode.
///
/// The discriminant is the field's position in the semicolon-delimited reply, which in turn
/// is the position of the corresponding query clause in
/// [`command::measure_all`](crate::command::measure_all). The decoder has no semantic
/// knowledge of the reply, only positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Measurement {
    /// Measured output voltage.
    Voltage = 0,
    /// Measured output current.
    Current = 1,
    /// Measured output power.
    Power = 2,
    /// Over-voltage protection status.
    ProtectionStatus = 3,
}

impl Measurement {
    /// Position of this value in the measure-all reply.
    pub fn index(self) -> usize {
        self as usize
    }
}
