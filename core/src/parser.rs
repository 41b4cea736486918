//! Reqline grammar validation and descriptor building.
//!
//! ```text
//! reqline := "HTTP " method " | URL " url (" | " keyword " " json-value)*
//! ```
//!
//! Segment 0 and 1 are positional; every later segment is an optional
//! `HEADERS`, `QUERY` or `BODY` section in any order. Validation is an
//! explicit scan by position and stops at the first violated rule.

use serde_json::Value;

use crate::error::ParseError;
use crate::http::HttpMethod;
use crate::segment;
use crate::types::{Keyword, ReqlineDescriptor};

const HTTP_PREFIX: &str = "HTTP ";
const URL_PREFIX: &str = "URL ";

/// Parse a reqline into a descriptor.
pub fn parse_reqline(input: &str) -> Result<ReqlineDescriptor, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyReqline);
    }
    let segments = segment::segments(input)?;

    let method = parse_method(segments[0])?;
    let url = parse_url(segments.get(1).copied())?;

    let mut descriptor = ReqlineDescriptor::new(method, url);
    for seg in &segments[2..] {
        let (keyword, value) = parse_section(seg)?;
        descriptor.set_section(keyword, value);
    }
    Ok(descriptor)
}

/// Strip a mandatory `KEYWORD ` prefix and return the value after it.
fn strip_keyword<'a>(
    segment: &'a str,
    prefix: &str,
    missing: ParseError,
) -> Result<&'a str, ParseError> {
    let Some(rest) = segment.strip_prefix(prefix) else {
        return Err(missing);
    };
    if rest.is_empty() {
        return Err(ParseError::MissingSpaceAfterKeyword);
    }
    if rest.starts_with(' ') {
        return Err(ParseError::MultipleSpaces);
    }
    Ok(rest)
}

fn parse_method(segment: &str) -> Result<HttpMethod, ParseError> {
    let token = strip_keyword(segment, HTTP_PREFIX, ParseError::MissingHttpKeyword)?;
    if token != token.to_uppercase() {
        return Err(ParseError::MethodNotUppercase);
    }
    HttpMethod::from_token(token).ok_or(ParseError::UnsupportedMethod)
}

fn parse_url(segment: Option<&str>) -> Result<String, ParseError> {
    let segment = segment.ok_or(ParseError::MissingUrlKeyword)?;
    let url = strip_keyword(segment, URL_PREFIX, ParseError::MissingUrlKeyword)?;
    Ok(url.to_string())
}

/// Split an optional segment at its first space and decode the value.
fn parse_section(segment: &str) -> Result<(Keyword, Value), ParseError> {
    let Some((token, value)) = segment.split_once(' ') else {
        return Err(ParseError::MissingSpaceAfterKeyword);
    };
    if token != token.to_uppercase() {
        return Err(ParseError::KeywordNotUppercase);
    }
    if value.is_empty() {
        return Err(ParseError::MissingSpaceAfterKeyword);
    }
    if value.starts_with(' ') {
        return Err(ParseError::MultipleSpaces);
    }
    let keyword = Keyword::from_token(token).ok_or(ParseError::UnknownKeyword)?;
    let value = decode_value(keyword, value)?;
    Ok((keyword, value))
}

/// Decode a section value as JSON of any shape.
fn decode_value(keyword: Keyword, raw: &str) -> Result<Value, ParseError> {
    serde_json::from_str(raw).map_err(|_| ParseError::InvalidJson(keyword))
}
