//! HTTP types exchanged with the transport capability.
//!
//! # Design
//! The executor describes the outbound call as plain data and hands it to a
//! `Transport`. All fields are owned so a request can be moved onto a
//! blocking worker thread without lifetime concerns.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransportError;

/// HTTP method accepted by the reqline grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Match an already upper-cased method token. No case folding.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Always `None` for GET.
    pub body: Option<Value>,
}

/// What the transport returns for any status code the server sent.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

/// The capability the executor dispatches through.
///
/// Implementations must return `Ok` for every HTTP status code and only
/// fail on transport-level problems.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
