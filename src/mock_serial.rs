//! We use this mocking module in unit tests to emulate the serial link.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Observable state of a [`MockLink`].
///
/// Held behind a shared handle so tests can keep inspecting writes and open/close counts
/// after the session has taken ownership of the link.
#[derive(Debug, Default)]
pub struct MockState {
    /// Every line handed to `write_line`, without the appended terminator.
    pub written: Vec<String>,
    /// Scripted replies; the front one becomes readable after the next write.
    pub replies: VecDeque<Vec<u8>>,
    /// Bytes currently waiting in the receive buffer.
    pub rx: Vec<u8>,
    /// Times a link sharing this state was opened.
    pub opens: usize,
    /// Times a link sharing this state was closed.
    pub closes: usize,
    /// When set, writes fail with a broken-pipe I/O error without recording anything.
    pub fail_writes: bool,
}

pub type SharedState = Rc<RefCell<MockState>>;

/// Our mock type used to emulate the serial link.
pub struct MockLink {
    state: SharedState,
    open: bool,
}

impl MockLink {
    /// Create a fresh link together with the shared state handle.
    pub fn new() -> (Self, SharedState) {
        let state: SharedState = Rc::default();
        let link = Self::with_state(Rc::clone(&state));
        (link, state)
    }

    /// Create a link counting against an existing state, as a re-opened port would.
    pub fn with_state(state: SharedState) -> Self {
        state.borrow_mut().opens += 1;
        MockLink { state, open: true }
    }

    /// Queue a reply to be served after the next write.
    pub fn queue_reply(&self, text: &str) {
        self.state
            .borrow_mut()
            .replies
            .push_back(text.as_bytes().to_vec());
    }
}

impl Transport for MockLink {
    fn is_open(&self) -> bool {
        self.open
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "simulated write failure",
            )));
        }
        state.written.push(text.to_owned());
        // The device answers each command; whatever was scripted next becomes readable.
        if let Some(reply) = state.replies.pop_front() {
            state.rx.extend_from_slice(&reply);
        }
        Ok(())
    }

    fn bytes_to_read(&mut self) -> Result<usize> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        Ok(self.state.borrow().rx.len())
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        Ok(std::mem::take(&mut self.state.borrow_mut().rx))
    }

    fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            self.state.borrow_mut().closes += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_written_lines() {
        let (mut link, state) = MockLink::new();
        link.write_line(":SYST:REM\n").unwrap();
        link.write_line("OUTP 1").unwrap();
        assert_eq!(state.borrow().written, vec![":SYST:REM\n", "OUTP 1"]);
    }

    #[test]
    fn reply_becomes_readable_after_write() {
        let (mut link, _state) = MockLink::new();
        link.queue_reply("12.50;0.75;9.38;0");

        assert_eq!(link.bytes_to_read().unwrap(), 0);
        link.write_line("query").unwrap();
        assert_eq!(link.bytes_to_read().unwrap(), 17);
        assert_eq!(link.read_available().unwrap(), b"12.50;0.75;9.38;0");
        assert_eq!(link.bytes_to_read().unwrap(), 0);
    }

    #[test]
    fn counts_opens_and_closes() {
        let (mut link, state) = MockLink::new();
        assert_eq!(state.borrow().opens, 1);
        assert_eq!(state.borrow().closes, 0);

        link.close().unwrap();
        // Closing twice must not double-count.
        link.close().unwrap();
        assert_eq!(state.borrow().closes, 1);

        let second = MockLink::with_state(Rc::clone(&state));
        assert_eq!(state.borrow().opens, 2);
        assert!(second.is_open());
    }

    #[test]
    fn write_failure_simulation() {
        let (mut link, state) = MockLink::new();
        state.borrow_mut().fail_writes = true;

        assert!(matches!(link.write_line("OUTP 1"), Err(Error::Io(_))));
        assert!(state.borrow().written.is_empty());
    }

    #[test]
    fn closed_link_refuses_io() {
        let (mut link, state) = MockLink::new();
        link.close().unwrap();

        assert!(matches!(link.write_line("OUTP 1"), Err(Error::NotConnected)));
        assert!(matches!(link.bytes_to_read(), Err(Error::NotConnected)));
        assert!(state.borrow().written.is_empty());
    }
}
