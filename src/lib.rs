//! Client-side protocol core for a slash-command websocket chat.
//!
//! User input goes through [`command::parse`] into an
//! [`OutboundMessage`], which a [`Session`] encodes and sends while its
//! connection is open. Inbound text and connection notices are rendered by
//! [`sanitize::render`] and handed to the shell's line callback.

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod sanitize;
pub mod session;
pub mod websocket;

pub use command::{parse, Command, ParsedInput};
pub use config::Config;
pub use error::{ChatError, Result};
pub use message::{decode, encode, OutboundMessage};
pub use sanitize::{render, DisplayCategory, SafeMarkup};
pub use session::{ConnectionState, Session, Transport, TransportEvent};
pub use websocket::WsHandle;
