//! This crate provides an interface for communicating with and controlling Toellner bench
//! power supplies that speak the SCPI ASCII dialect over a serial line.
//!
//! It was written against the Toellner TOE 8952 (two outputs), but the command set is the
//! generic SCPI `:INST`/`:VOLT`/`:CURR`/`OUTP`/`:MEAS` vocabulary, so other supplies of the
//! series may work as well.
//!
//! The device offers no completion signal and no reply framing. Each request is therefore a
//! write followed by a fixed settle delay (500 ms by default) before whatever bytes have
//! arrived are read back. Replies to the measurement query are semicolon-delimited fields
//! decoded by position.
//!
//! A [`psu::Psu`] owns its serial link exclusively and every exchange goes through
//! `&mut self`. A session shared between threads must be wrapped in a mutex by the caller;
//! concurrent writers racing on the same serial line would interleave and corrupt replies.
//!
//! The serial port used for PSU comms should be configured like so:
//! * Typical baud rate: 9600
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None

pub mod command;
pub mod error;
pub mod psu;
pub mod response;
pub mod transport;
pub mod types;

#[cfg(test)]
mod mock_serial;
