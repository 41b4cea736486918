//! Request execution: URL assembly, dispatch and timing.
//!
//! # Design
//! The executor owns no connection state. It builds an `HttpRequest`,
//! brackets the `Transport::send` call with epoch-millisecond timestamps
//! and folds the outcome into an `ExecutionEnvelope`. Any status code is a
//! successful dispatch; only transport failures become errors.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use url::Url;

use crate::error::ReqlineError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::{ExecutionEnvelope, ReqlineDescriptor, RequestEcho, ResponseSummary};

/// Execute a parsed reqline through `transport`.
pub fn execute<T>(
    descriptor: &ReqlineDescriptor,
    transport: &T,
) -> Result<ExecutionEnvelope, ReqlineError>
where
    T: Transport + ?Sized,
{
    let full_url = build_full_url(&descriptor.url, &descriptor.query)?;
    let request = HttpRequest {
        method: descriptor.method,
        url: full_url.clone(),
        headers: header_pairs(&descriptor.headers),
        body: match descriptor.method {
            HttpMethod::Post => Some(descriptor.body.clone()),
            HttpMethod::Get => None,
        },
    };

    tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
    let start = epoch_millis();
    let outcome = transport.send(&request);
    let stop = epoch_millis().max(start);

    let response = outcome.map_err(|err| {
        tracing::warn!(url = %request.url, error = %err, "request failed");
        ReqlineError::from(err)
    })?;

    Ok(ExecutionEnvelope {
        request: RequestEcho {
            query: descriptor.query.clone(),
            body: descriptor.body.clone(),
            headers: descriptor.headers.clone(),
            full_url,
        },
        response: ResponseSummary {
            http_status: response.status,
            duration: stop - start,
            request_start_timestamp: start,
            request_stop_timestamp: stop,
            response_data: response.data,
        },
    })
}

/// Parse `base` and apply every non-null query entry with set semantics:
/// the first existing parameter of the same name is replaced in place and
/// any later duplicates are dropped; new names are appended.
pub fn build_full_url(base: &str, query: &Value) -> Result<String, ReqlineError> {
    let mut url = Url::parse(base)
        .map_err(|err| ReqlineError::internal(format!("invalid base url {base:?}: {err}")))?;

    let Some(entries) = query.as_object() else {
        return Ok(url.into());
    };

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut changed = false;
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        changed = true;
        let value = coerce_to_string(value);
        match pairs.iter().position(|(name, _)| name == key) {
            Some(first) => {
                pairs[first].1 = value;
                let mut index = 0;
                pairs.retain(|(name, _)| {
                    let keep = index == first || name != key;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((key.clone(), value)),
        }
    }

    if changed {
        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }
    Ok(url.into())
}

/// Enumerate object entries as header pairs. Null values are skipped.
fn header_pairs(headers: &Value) -> Vec<(String, String)> {
    let Some(entries) = headers.as_object() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.clone(), coerce_to_string(value)))
        .collect()
}

/// Strings pass through unquoted and arrays join their elements with `,`
/// (nulls render empty). Objects render as compact JSON.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
