//! Error types for the chat client.

use thiserror::Error;

/// Common error type for the chat client.
#[derive(Error, Debug)]
pub enum ChatError {
    /// A send was attempted while the connection is not open.
    #[error("WebSocket is not open.")]
    NotOpen,

    /// The user typed a slash-command the client does not know.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Connection-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// A frame could not be (de)serialized.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server URL could not be parsed.
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for chat client operations.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_open_display() {
        assert_eq!(ChatError::NotOpen.to_string(), "WebSocket is not open.");
    }

    #[test]
    fn test_unknown_command_display() {
        let err = ChatError::UnknownCommand("bogus".to_string());
        assert_eq!(err.to_string(), "Unknown command: bogus");
    }

    #[test]
    fn test_transport_error_display() {
        let err = ChatError::Transport("connection reset".to_string());
        assert_eq!(err.to_string(), "transport error: connection reset");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChatError = io_err.into();
        assert!(matches!(err, ChatError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_url_error_conversion() {
        let err: ChatError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ChatError::InvalidUrl(_)));
    }
}
