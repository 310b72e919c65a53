//! Wire format for messages sent to the chat server.
//!
//! Every frame is a JSON object tagged by `message_type`. Field names are
//! fixed by the server and must not change.

use serde::Deserialize;
use serde_json::json;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "message_type")]
pub enum OutboundMessage {
    /// Broadcast to every participant.
    #[serde(rename = "chat")]
    Chat {
        #[serde(rename = "message")]
        text: String,
    },
    /// Ask the server for its usage text.
    #[serde(rename = "help")]
    Help,
    /// Leave the chat.
    #[serde(rename = "quit")]
    Quit,
    /// Direct message to a single nickname.
    #[serde(rename = "private")]
    Private {
        #[serde(rename = "receiver")]
        recipient: String,
        #[serde(rename = "message")]
        text: String,
    },
    /// Register or change the sender's nickname.
    #[serde(rename = "nick")]
    SetNick { nick: String },
}

impl OutboundMessage {
    /// The `message_type` discriminant written on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::Chat { .. } => "chat",
            OutboundMessage::Help => "help",
            OutboundMessage::Quit => "quit",
            OutboundMessage::Private { .. } => "private",
            OutboundMessage::SetNick { .. } => "nick",
        }
    }
}

/// Serialize a message into its wire frame.
pub fn encode(message: &OutboundMessage) -> String {
    let kind = message.kind();
    match message {
        OutboundMessage::Chat { text } => json!({ "message_type": kind, "message": text }),
        OutboundMessage::Help | OutboundMessage::Quit => json!({ "message_type": kind }),
        OutboundMessage::Private { recipient, text } => json!({
            "message_type": kind,
            "receiver": recipient,
            "message": text,
        }),
        OutboundMessage::SetNick { nick } => json!({ "message_type": kind, "nick": nick }),
    }
    .to_string()
}

/// Parse a wire frame back into a message.
pub fn decode(frame: &str) -> Result<OutboundMessage> {
    Ok(serde_json::from_str(frame)?)
}
