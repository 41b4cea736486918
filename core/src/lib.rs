//! Reqline parsing and execution core.
//!
//! # Overview
//! A reqline is a single-line, pipe-delimited description of an HTTP call:
//!
//! ```text
//! HTTP GET | URL https://example.com/items | QUERY {"page":1} | HEADERS {"X-Key":"k"}
//! ```
//!
//! `parse_reqline` validates it against the grammar and produces a
//! `ReqlineDescriptor`; `execute` merges the query into the URL, dispatches
//! through a `Transport` and returns an `ExecutionEnvelope` with status,
//! timing and payload.
//!
//! # Design
//! - Parsing is a synchronous left-to-right scan that stops at the first
//!   violated rule. Each rule has a fixed message (`ParseError`).
//! - The core holds no state between invocations. Connection handling is
//!   the transport's business; `UreqTransport` is the default.
//! - Every failure leaving the crate is a `ReqlineError`: a message plus an
//!   `exposable` flag the boundary maps to a status code.

pub mod error;
pub mod executor;
pub mod http;
pub mod parser;
pub mod segment;
pub mod transport;
pub mod types;

pub use error::{ParseError, ReqlineError, TransportError};
pub use executor::{build_full_url, execute};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use parser::parse_reqline;
pub use transport::UreqTransport;
pub use types::{ExecutionEnvelope, Keyword, ReqlineDescriptor, RequestEcho, ResponseSummary};

/// Parse `reqline` and execute it through `transport`.
pub fn run<T>(reqline: &str, transport: &T) -> Result<ExecutionEnvelope, ReqlineError>
where
    T: Transport + ?Sized,
{
    let descriptor = parse_reqline(reqline)?;
    execute(&descriptor, transport)
}
