//! Error types for Talawa collection operations.
//!
//! Every fetch collaborator reports failures through [`Error`]. The
//! collection controller never inspects the variant beyond handing it to a
//! [`Notifier`](crate::Notifier); callers that need to branch on failure kind
//! can match on it directly.

use std::fmt;
use thiserror::Error;

/// The unified error type for Talawa client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or I/O transport errors (connection, timeout, file access).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP responses from the API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// GraphQL-level errors reported in a 200 response.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Input validation errors (ids, cursors, endpoints).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (body decoding, redirect loops, ...).
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A non-success HTTP response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// First error message found in the response body, if any.
    pub message: Option<String>,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the server rejected the request's credentials.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Errors reported by the GraphQL layer itself.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The response carried an `errors` array.
    #[error("{}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    /// The root field of the query resolved to null.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid entity identifier.
    #[error("invalid {kind} id '{value}': {reason}")]
    Id {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// Invalid or unknown pagination cursor.
    #[error("invalid cursor '{value}': {reason}")]
    Cursor { value: String, reason: String },

    /// Invalid API endpoint.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Query(QueryError::Malformed {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(502, Some("bad gateway".to_string()));
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert!(!err.is_auth_error());
        assert!(ProtocolError::new(401, None).is_auth_error());
    }

    #[test]
    fn graphql_messages_are_joined() {
        let err: Error = QueryError::Graphql {
            messages: vec!["first".to_string(), "second".to_string()],
        }
        .into();
        assert_eq!(err.to_string(), "query error: first; second");
    }

    #[test]
    fn io_errors_map_to_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Transport(TransportError::Io { .. })));
    }
}
