//! The serial-line transport the session talks through.
//!
//! [`Transport`] is the seam between the protocol layer and the host's serial stack: a
//! line-oriented write, a poll for buffered bytes, a drain, and a close. The production
//! implementation [`SerialLink`] sits on top of the `serialport` crate; tests substitute a
//! scripted mock.

use std::io::{Read, Write};
use std::time::Duration;

use log::debug;
use serialport::{DataBits, Parity, SerialPort, StopBits};

use crate::error::{Error, Result};

/// Backstop timeout for blocking port reads. Reads only ever ask for bytes the port has
/// already reported as buffered, so this should never be hit on a healthy link.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Byte-level primitives the protocol layer consumes.
///
/// No framing, checksum or terminator support is assumed; the session compensates with its
/// settle-interval read strategy.
pub trait Transport {
    /// Whether the underlying connection is usable.
    fn is_open(&self) -> bool;

    /// Write `text` followed by a line terminator.
    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Number of received bytes waiting to be read.
    fn bytes_to_read(&mut self) -> Result<usize>;

    /// Drain and return all currently buffered bytes.
    fn read_available(&mut self) -> Result<Vec<u8>>;

    /// Release the underlying connection.
    fn close(&mut self) -> Result<()>;
}

/// Serial-port parameters beyond the baud rate.
#[derive(Debug, Clone, Copy)]
pub struct PortSettings {
    pub parity: Parity,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
}

/// No parity, 8 data bits, one stop bit.
impl Default for PortSettings {
    fn default() -> Self {
        PortSettings {
            parity: Parity::None,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
        }
    }
}

/// [`Transport`] implementation over an OS serial port.
pub struct SerialLink {
    port: Option<Box<dyn SerialPort>>,
}

impl SerialLink {
    /// Open `port_name` at `baud` with the default 8N1 settings.
    pub fn open(port_name: &str, baud: u32) -> Result<Self> {
        Self::open_with(port_name, baud, PortSettings::default())
    }

    /// Open `port_name` at `baud` with explicit parity, data bits and stop bits.
    pub fn open_with(port_name: &str, baud: u32, settings: PortSettings) -> Result<Self> {
        let port = serialport::new(port_name, baud)
            .parity(settings.parity)
            .data_bits(settings.data_bits)
            .stop_bits(settings.stop_bits)
            .timeout(READ_TIMEOUT)
            .open()?;
        debug!("opened serial port {port_name} at {baud} baud");
        Ok(SerialLink { port: Some(port) })
    }
}

impl Transport for SerialLink {
    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        port.write_all(text.as_bytes())?;
        port.write_all(b"\n")?;
        port.flush()?;
        Ok(())
    }

    fn bytes_to_read(&mut self) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        Ok(port.bytes_to_read()? as usize)
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        let available = self.bytes_to_read()?;
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        let mut buf = vec![0u8; available];
        port.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(port) = self.port.take() {
            debug!("closing serial port {:?}", port.name());
        }
        Ok(())
    }
}

/// Names of the serial ports currently known to the OS.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
