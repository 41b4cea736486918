//! Error types for reqline parsing and execution.
//!
//! # Design
//! `ParseError` names every grammar rule a reqline can break; its `Display`
//! text is the stable message handed back to callers. Everything that leaves
//! the crate is folded into `ReqlineError`, which carries only a message and
//! an `exposable` flag. Callers switch on the flag, never on the message.

use thiserror::Error;

use crate::types::Keyword;

/// A single grammar violation, reported at the first rule that fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty reqline")]
    EmptyReqline,

    #[error("Invalid spacing around pipe delimiter")]
    InvalidPipeSpacing,

    #[error("Multiple spaces found where single space expected")]
    MultipleSpaces,

    #[error("Missing space after keyword")]
    MissingSpaceAfterKeyword,

    #[error("Missing required HTTP keyword")]
    MissingHttpKeyword,

    #[error("HTTP method must be uppercase")]
    MethodNotUppercase,

    #[error("Invalid HTTP method. Only GET and POST are supported")]
    UnsupportedMethod,

    #[error("Missing required URL keyword")]
    MissingUrlKeyword,

    #[error("Keywords must be uppercase")]
    KeywordNotUppercase,

    #[error("Unknown keyword")]
    UnknownKeyword,

    #[error("Invalid JSON format in {0} section")]
    InvalidJson(Keyword),
}

/// Failure reported by a `Transport` implementation.
///
/// Only transport-level problems (connection refused, DNS, bad header
/// names, unreadable body) end up here; HTTP status codes never do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A classified failure: a message plus whether it is safe to show the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReqlineError {
    message: String,
    exposable: bool,
}

impl ReqlineError {
    /// A failure whose message may be returned verbatim at a client-error status.
    pub fn exposed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exposable: true,
        }
    }

    /// A failure whose message must stay on the server side.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exposable: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_exposable(&self) -> bool {
        self.exposable
    }
}

impl From<ParseError> for ReqlineError {
    fn from(err: ParseError) -> Self {
        Self::exposed(err.to_string())
    }
}

impl From<TransportError> for ReqlineError {
    fn from(err: TransportError) -> Self {
        if err.message.is_empty() {
            Self::exposed("Request failed")
        } else {
            Self::exposed(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_names_the_keyword() {
        assert_eq!(
            ParseError::InvalidJson(Keyword::Query).to_string(),
            "Invalid JSON format in QUERY section"
        );
        assert_eq!(
            ParseError::InvalidJson(Keyword::Headers).to_string(),
            "Invalid JSON format in HEADERS section"
        );
    }

    #[test]
    fn parse_errors_are_exposable() {
        let err: ReqlineError = ParseError::UnsupportedMethod.into();
        assert!(err.is_exposable());
        assert_eq!(
            err.message(),
            "Invalid HTTP method. Only GET and POST are supported"
        );
    }

    #[test]
    fn empty_transport_message_falls_back_to_generic() {
        let err: ReqlineError = TransportError::new("").into();
        assert!(err.is_exposable());
        assert_eq!(err.message(), "Request failed");
    }

    #[test]
    fn internal_errors_are_not_exposable() {
        let err = ReqlineError::internal("worker panicked");
        assert!(!err.is_exposable());
        assert_eq!(err.to_string(), "worker panicked");
    }
}
