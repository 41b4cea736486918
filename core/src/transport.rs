//! Blocking `Transport` backed by ureq.
//!
//! Status codes are returned as data (`http_status_as_error(false)`), so
//! only connection-level problems surface as `TransportError`.

use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Build a transport whose every call is bounded by `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (request.method, &request.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(request.url.as_str());
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => {
                        let has_content_type = request
                            .headers
                            .iter()
                            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
                        if !has_content_type {
                            builder = builder.content_type("application/json");
                        }
                        let bytes = serde_json::to_vec(body)
                            .map_err(|e| TransportError::new(e.to_string()))?;
                        builder.send(&bytes[..])
                    }
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            data: decode_payload(text),
        })
    }
}

/// JSON bodies are decoded; anything else is kept as a string.
fn decode_payload(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
