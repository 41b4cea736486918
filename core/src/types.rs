//! Descriptor and envelope types.
//!
//! # Design
//! `ReqlineDescriptor` is what the parser produces and the executor
//! consumes. The three optional sections are JSON values that default to an
//! empty object, so downstream code never branches on presence. Any JSON
//! shape is accepted for them; only object entries are enumerated when
//! headers and query parameters are applied.
//!
//! `ExecutionEnvelope` serializes to the `{request, response}` payload
//! returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::HttpMethod;

/// Keyword of an optional reqline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Headers,
    Query,
    Body,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Headers => "HEADERS",
            Keyword::Query => "QUERY",
            Keyword::Body => "BODY",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HEADERS" => Some(Keyword::Headers),
            "QUERY" => Some(Keyword::Query),
            "BODY" => Some(Keyword::Body),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reqline, ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReqlineDescriptor {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default = "empty_object")]
    pub headers: Value,
    #[serde(default = "empty_object")]
    pub query: Value,
    #[serde(default = "empty_object")]
    pub body: Value,
}

impl ReqlineDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: empty_object(),
            query: empty_object(),
            body: empty_object(),
        }
    }

    /// Store a decoded section value. Repeated keywords overwrite.
    pub fn set_section(&mut self, keyword: Keyword, value: Value) {
        match keyword {
            Keyword::Headers => self.headers = value,
            Keyword::Query => self.query = value,
            Keyword::Body => self.body = value,
        }
    }

    pub fn section(&self, keyword: Keyword) -> &Value {
        match keyword {
            Keyword::Headers => &self.headers,
            Keyword::Query => &self.query,
            Keyword::Body => &self.body,
        }
    }
}

/// Renders the canonical reqline. Empty object sections are omitted.
impl fmt::Display for ReqlineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} | URL {}", self.method, self.url)?;
        for keyword in [Keyword::Headers, Keyword::Query, Keyword::Body] {
            let value = self.section(keyword);
            if matches!(value, Value::Object(map) if map.is_empty()) {
                continue;
            }
            write!(f, " | {keyword} {value}")?;
        }
        Ok(())
    }
}

pub(crate) fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Echo of what was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEcho {
    pub query: Value,
    pub body: Value,
    pub headers: Value,
    pub full_url: String,
}

/// Status, timing and payload of the response. Timestamps are epoch
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub http_status: u16,
    pub duration: u64,
    pub request_start_timestamp: u64,
    pub request_stop_timestamp: u64,
    pub response_data: Value,
}

/// Result of one successful pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionEnvelope {
    pub request: RequestEcho,
    pub response: ResponseSummary,
}
