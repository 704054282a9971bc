//! Client Error Types
//!
//! Every call ends in one of two failure kinds: the request never produced a
//! usable envelope (transport), or the backend answered `success: false`
//! (application).

use thiserror::Error;

/// Errors produced by a backend exchange
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Request could not be sent or no response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the JSON shape we expected
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Backend answered with `success: false`
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

/// Which of the two failure kinds an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Application,
}

impl ClientError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Network(_) | ClientError::Malformed(_) => FailureKind::Transport,
            ClientError::Rejected { .. } => FailureKind::Application,
        }
    }

    /// Message supplied by the backend, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed(err.to_string())
    }
}

/// Result type alias for backend calls
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ClientError::Network("refused".into()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::Malformed("eof".into()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::rejected("Invalid credentials").kind(),
            FailureKind::Application
        );
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::rejected("Invalid credentials");
        assert_eq!(err.to_string(), "Request rejected: Invalid credentials");
        assert_eq!(err.server_message(), Some("Invalid credentials"));

        let err = ClientError::Rejected { message: None };
        assert_eq!(err.to_string(), "Request rejected: no message");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Malformed(_)));
    }
}
