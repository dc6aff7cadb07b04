//! The PSU session: connection lifecycle and the public command surface.

use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::command;
use crate::error::{Error, Result};
use crate::response;
use crate::transport::{PortSettings, SerialLink, Transport};
use crate::types::{Channel, Measurement};

/// Default delay between writing a command and sampling the reply.
///
/// The supply emits no completion signal, so this wait is the protocol's only
/// synchronization primitive.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(500);

/// A control session with one supply.
///
/// The session is created closed; [`Psu::connect`] (or [`Psu::attach`] with an already
/// opened transport) brings it up, puts the device into remote mode, and any number of
/// operations may follow until [`Psu::close`] hands control back to the front panel.
///
/// Operations requiring an open session fail with [`Error::NotConnected`] without touching
/// the wire. A failed operation never changes the open/closed state, and nothing is ever
/// retried.
pub struct Psu<T: Transport = SerialLink> {
    link: Option<T>,
    settle: Duration,
}

impl<T: Transport> Psu<T> {
    /// Create a closed session.
    pub fn new() -> Self {
        Psu {
            link: None,
            settle: SETTLE_INTERVAL,
        }
    }

    /// Whether the session currently holds an open transport.
    pub fn is_open(&self) -> bool {
        self.link.as_ref().is_some_and(|link| link.is_open())
    }

    /// The current post-write settle delay.
    pub fn settle_interval(&self) -> Duration {
        self.settle
    }

    /// Override the post-write settle delay.
    ///
    /// Slow supplies may need more than the default; tests against a scripted transport
    /// set this to zero.
    pub fn set_settle_interval(&mut self, interval: Duration) {
        self.settle = interval;
    }

    /// Bring the session up on an already opened transport.
    ///
    /// Any transport still attached from an earlier connect is closed first, so the session
    /// never holds more than one link. On success the device has been switched to
    /// remote-control mode.
    pub fn attach(&mut self, link: T) -> Result<()> {
        if let Some(mut old) = self.link.take() {
            debug!("re-connecting, closing previous transport");
            if let Err(err) = old.close() {
                warn!("failed to close previous transport: {err}");
            }
        }
        self.link = Some(link);
        self.exchange(&command::remote_enable())?;
        debug!("session open, device in remote mode");
        Ok(())
    }

    /// Select `channel` and set its voltage, optionally enabling the output.
    pub fn set_output_voltage(
        &mut self,
        channel: impl Into<Channel>,
        volts: f64,
        enable: bool,
    ) -> Result<()> {
        self.exchange(&command::select_and_set_voltage(channel, volts, enable))?;
        Ok(())
    }

    /// Select `channel` and set both voltage and current limit, optionally enabling the
    /// output.
    pub fn set_output_levels(
        &mut self,
        channel: impl Into<Channel>,
        volts: f64,
        amps: f64,
        enable: bool,
    ) -> Result<()> {
        self.exchange(&command::select_and_set_levels(channel, volts, amps, enable))?;
        Ok(())
    }

    /// Read one measured value from `channel`.
    ///
    /// Sends the combined measurement query and decodes the field selected by `target`
    /// from the reply.
    pub fn measure(&mut self, channel: impl Into<Channel>, target: Measurement) -> Result<f64> {
        let reply = self.exchange(&command::measure_all(channel))?;
        response::field(&reply, target)
    }

    /// Switch the currently selected output on or off.
    pub fn set_output_state(&mut self, enable: bool) -> Result<()> {
        self.exchange(&command::output_state(enable))?;
        Ok(())
    }

    /// Reset the supply and clear its status registers.
    pub fn reset_and_clear(&mut self) -> Result<()> {
        self.exchange(&command::reset_and_clear())?;
        Ok(())
    }

    /// Send an arbitrary command string and return the raw reply.
    ///
    /// Escape hatch for commands without a dedicated builder. The reply is empty when the
    /// device had nothing to say within the settle interval.
    pub fn send_raw(&mut self, text: &str) -> Result<String> {
        self.exchange(text)
    }

    /// Hand the device back to its front panel and close the transport.
    ///
    /// The transport is closed even if the go-to-local write fails.
    pub fn close(&mut self) -> Result<()> {
        let mut link = self.link.take().ok_or(Error::NotConnected)?;
        debug!("releasing device to local control");
        let released = link.write_line(&command::go_to_local());
        let closed = link.close();
        released.and(closed)
    }

    /// Write a command, wait the settle interval, then drain whatever reply arrived.
    fn exchange(&mut self, cmd: &str) -> Result<String> {
        let link = self.link.as_mut().ok_or(Error::NotConnected)?;
        trace!("-> {cmd:?}");
        link.write_line(cmd)?;
        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }
        if link.bytes_to_read()? == 0 {
            return Ok(String::new());
        }
        let reply = String::from_utf8_lossy(&link.read_available()?).into_owned();
        trace!("<- {reply:?}");
        Ok(reply)
    }
}

impl<T: Transport> Default for Psu<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Psu<SerialLink> {
    /// Open `port_name` at `baud` with the default 8N1 settings and bring the session up.
    pub fn connect(&mut self, port_name: &str, baud: u32) -> Result<()> {
        self.connect_with(port_name, baud, PortSettings::default())
    }

    /// Open `port_name` with explicit port settings and bring the session up.
    pub fn connect_with(
        &mut self,
        port_name: &str,
        baud: u32,
        settings: PortSettings,
    ) -> Result<()> {
        let link = SerialLink::open_with(port_name, baud, settings)?;
        self.attach(link)
    }
}
