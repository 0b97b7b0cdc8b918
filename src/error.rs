//! ChatWork Error Types
//!
//! Error handling for the ChatWork client library.

use thiserror::Error;

/// Main error type for client operations
#[derive(Debug, Error)]
pub enum ChatworkError {
    /// Configuration errors (missing API key, unreadable config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be constructed (malformed URL, bad form part)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport failure before a response was received
    #[error("Request failed: {0}")]
    Request(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The server answered with a non-200 status and a non-empty error list.
    /// Displays as the server's messages joined with ", ".
    #[error("{}", .errors.join(", "))]
    Api { status: u16, errors: Vec<String> },

    /// Response decoding failed
    #[error("Response error: {0}")]
    Response(String),

    /// Reading a response body or an upload stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatworkError {
    /// The messages returned by the server, if this is an API error.
    pub fn api_errors(&self) -> Option<&[String]> {
        match self {
            ChatworkError::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatworkError::Timeout(err.to_string())
        } else if err.is_connect() {
            ChatworkError::Request(format!("Connection failed: {}", err))
        } else if err.is_builder() {
            ChatworkError::InvalidRequest(err.to_string())
        } else {
            ChatworkError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ChatworkError {
    fn from(err: serde_json::Error) -> Self {
        ChatworkError::Response(format!("JSON parsing error: {}", err))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ChatworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_joins_messages() {
        let err = ChatworkError::Api {
            status: 403,
            errors: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "a, b");
        assert_eq!(err.api_errors().unwrap().len(), 2);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ChatworkError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, ChatworkError::Io(_)));
        assert!(err.api_errors().is_none());
    }
}
