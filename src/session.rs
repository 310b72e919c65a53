//! Connection session: lifecycle state machine and message routing.
//!
//! A [`Session`] owns the connection state and the outbound half of the
//! transport. Inbound lifecycle events are fed in with
//! [`Session::handle_event`]; every line that should appear in the transcript
//! goes out through the render callback.

use tracing::{debug, info, warn};

use crate::command::{self, ParsedInput};
use crate::message::{encode, OutboundMessage};
use crate::sanitize::{render, DisplayCategory, SafeMarkup};
use crate::{ChatError, Result};

pub const CONNECTED_NOTICE: &str = "Connected to the chat server.";
pub const ERROR_NOTICE: &str = "An error occurred with the connection.";
pub const CLOSED_NOTICE: &str = "Chat connection closed.";

/// Lifecycle events reported by the underlying transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionState {
    /// No further transitions out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Errored)
    }

    /// Transition table. `None` means the event is ignored in this state.
    ///
    /// A close that follows an error keeps the session `Errored`.
    pub fn next(self, event: &TransportEvent) -> Option<ConnectionState> {
        use ConnectionState::*;

        match (self, event) {
            (Connecting, TransportEvent::Opened) => Some(Open),
            (Open, TransportEvent::Message(_)) => Some(Open),
            (Connecting | Open, TransportEvent::Error(_)) => Some(Errored),
            (Connecting | Open, TransportEvent::Closed) => Some(Closed),
            (Errored, TransportEvent::Closed) => Some(Errored),
            _ => None,
        }
    }
}

/// Outbound half of a connection.
pub trait Transport {
    /// Hand a frame to the connection without waiting for it to be written.
    fn transmit(&mut self, frame: String) -> Result<()>;
}

pub struct Session<T, F> {
    state: ConnectionState,
    transport: T,
    on_render_line: F,
}

impl<T, F> Session<T, F>
where
    T: Transport,
    F: FnMut(SafeMarkup, DisplayCategory),
{
    pub fn new(transport: T, on_render_line: F) -> Self {
        Self {
            state: ConnectionState::Connecting,
            transport,
            on_render_line,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Apply a transport lifecycle event.
    pub fn handle_event(&mut self, event: TransportEvent) {
        let Some(next) = self.state.next(&event) else {
            debug!(state = ?self.state, ?event, "ignoring transport event");
            return;
        };

        if next != self.state {
            info!(from = ?self.state, to = ?next, "connection state changed");
        }
        self.state = next;

        match event {
            TransportEvent::Opened => self.emit(CONNECTED_NOTICE, DisplayCategory::Server),
            TransportEvent::Message(data) => self.emit(&data, DisplayCategory::Server),
            TransportEvent::Error(reason) => {
                warn!(%reason, "connection error");
                self.emit(ERROR_NOTICE, DisplayCategory::Server);
            }
            TransportEvent::Closed => self.emit(CLOSED_NOTICE, DisplayCategory::Server),
        }
    }

    /// Encode and transmit a message. Only succeeds while the connection is open.
    pub fn send(&mut self, message: &OutboundMessage) -> Result<()> {
        if self.state != ConnectionState::Open {
            warn!(state = ?self.state, kind = message.kind(), "send rejected");
            return Err(ChatError::NotOpen);
        }

        let frame = encode(message);
        debug!(kind = message.kind(), %frame, "sending frame");
        self.transport.transmit(frame)
    }

    /// Handle one submitted line of user input.
    ///
    /// Failures are rendered as server lines before being returned, so the
    /// caller only has to clear its input field. Plain text is echoed as a
    /// user line whether or not the send succeeded.
    pub fn send_raw(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        let parsed = command::parse(input);
        let echo = matches!(parsed, ParsedInput::PlainText(_));

        let result = match parsed.into_message() {
            Ok(None) => return Ok(()),
            Ok(Some(message)) => self.send(&message),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            let notice = match e {
                ChatError::Transport(_) => ERROR_NOTICE.to_string(),
                other => other.to_string(),
            };
            self.emit(&notice, DisplayCategory::Server);
        }
        if echo {
            self.emit(input, DisplayCategory::User);
        }

        result
    }

    fn emit(&mut self, text: &str, category: DisplayCategory) {
        (self.on_render_line)(render(text, category), category);
    }
}
