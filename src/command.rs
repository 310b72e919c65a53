//! Slash-command parser for user input.
//!
//! Input starting with `/` is a control directive; everything else is chat
//! text. Parsing is split from dispatch so each command path can be checked
//! without a connection.

use std::fmt;

use crate::message::OutboundMessage;
use crate::{ChatError, Result};

/// A recognized slash-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the chat. Arguments are ignored.
    Quit,
    /// Request the server's usage text. Arguments are ignored.
    Help,
    /// Set the nickname to the whole remainder.
    Nick,
    /// Send a private message: `<recipient> <body>`.
    Private,
}

impl Command {
    /// Get the command name as typed after the slash.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::Help => "help",
            Command::Nick => "nick",
            Command::Private => "private",
        }
    }

    /// Look up a command by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quit" => Some(Command::Quit),
            "help" => Some(Command::Help),
            "nick" => Some(Command::Nick),
            "private" => Some(Command::Private),
            _ => None,
        }
    }

    /// Build the wire message for this command from its raw argument string.
    pub fn to_message(self, args: &str) -> OutboundMessage {
        match self {
            Command::Quit => OutboundMessage::Quit,
            Command::Help => OutboundMessage::Help,
            Command::Nick => OutboundMessage::SetNick {
                nick: args.to_string(),
            },
            Command::Private => {
                let (recipient, text) = split_first_word(args);
                OutboundMessage::Private {
                    recipient: recipient.to_string(),
                    text: text.to_string(),
                }
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// Result of parsing one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// Nothing but whitespace; the caller skips the send.
    Empty,
    /// Regular chat text, unchanged.
    PlainText(String),
    /// Recognized command with its unsplit argument string.
    Command { command: Command, args: String },
    /// Slash-command with a name no command answers to.
    UnknownCommand(String),
}

impl ParsedInput {
    /// Turn the parsed input into the message to transmit.
    ///
    /// `Ok(None)` means there is nothing to send. Unknown commands are an
    /// error so the caller can surface them locally.
    pub fn into_message(self) -> Result<Option<OutboundMessage>> {
        match self {
            ParsedInput::Empty => Ok(None),
            ParsedInput::PlainText(text) => Ok(Some(OutboundMessage::Chat { text })),
            ParsedInput::Command { command, args } => Ok(Some(command.to_message(&args))),
            ParsedInput::UnknownCommand(name) => Err(ChatError::UnknownCommand(name)),
        }
    }
}

/// Parse a line of user input.
pub fn parse(input: &str) -> ParsedInput {
    if input.trim().is_empty() {
        return ParsedInput::Empty;
    }

    let Some(without_slash) = input.strip_prefix('/') else {
        return ParsedInput::PlainText(input.to_string());
    };

    let (name, args) = split_first_word(without_slash);
    match Command::from_name(name) {
        Some(command) => ParsedInput::Command {
            command,
            args: args.to_string(),
        },
        None => ParsedInput::UnknownCommand(name.to_string()),
    }
}

/// Split at the first run of whitespace; the remainder keeps its inner spacing.
fn split_first_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim_start()),
        None => (s, ""),
    }
}
