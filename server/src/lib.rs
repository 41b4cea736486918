//! HTTP boundary for the reqline service.
//!
//! # Overview
//! `POST /` takes `{"reqline": "<line>"}`, runs it through
//! `reqline_core::run` and answers with the execution envelope.
//!
//! # Design
//! - The pipeline is blocking (ureq), so it runs on `spawn_blocking`; the
//!   request task suspends while the outbound call is in flight.
//! - Errors are mapped here and nowhere else: exposable failures become
//!   400 with their message, anything else becomes a generic 500.
//! - The transport is injected through `AppState` so tests can swap in a
//!   canned one.

pub mod config;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use reqline_core::{ExecutionEnvelope, ReqlineError, Transport, UreqTransport};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

pub use config::{Config, ConfigError};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Shared transport used by every invocation. Holds no per-request state.
pub type SharedTransport = Arc<dyn Transport + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    transport: SharedTransport,
}

pub fn app() -> Router {
    app_with_transport(Arc::new(UreqTransport::new()))
}

pub fn app_with_transport(transport: SharedTransport) -> Router {
    Router::new()
        .route("/", post(handle_reqline))
        .with_state(AppState { transport })
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, transport: SharedTransport) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_transport(transport))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

async fn handle_reqline(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExecutionEnvelope>, ApiError> {
    let span = tracing::info_span!("reqline", request_id = %Uuid::new_v4());
    execute_reqline(state, body).instrument(span).await
}

async fn execute_reqline(state: AppState, body: Bytes) -> Result<Json<ExecutionEnvelope>, ApiError> {
    let reqline = extract_reqline(&body)?;
    tracing::debug!(%reqline, "executing reqline");

    let transport = Arc::clone(&state.transport);
    let span = tracing::Span::current();
    let envelope = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        reqline_core::run(&reqline, transport.as_ref())
    })
    .await
    .map_err(|err| ReqlineError::internal(err.to_string()))??;

    tracing::info!(
        http_status = envelope.response.http_status,
        duration_ms = envelope.response.duration,
        "reqline executed"
    );
    Ok(Json(envelope))
}

/// Pull a non-blank `reqline` string out of the JSON request body.
fn extract_reqline(body: &[u8]) -> Result<String, ReqlineError> {
    let missing = || ReqlineError::exposed("Missing reqline in request body");
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(missing());
    }
    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| ReqlineError::exposed("Invalid JSON request body"))?;
    match payload.get("reqline").and_then(Value::as_str) {
        Some(line) if !line.trim().is_empty() => Ok(line.to_string()),
        _ => Err(missing()),
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: bool,
    message: &'a str,
}

/// Boundary wrapper that maps a classified error onto a status code.
#[derive(Debug)]
pub struct ApiError(ReqlineError);

impl From<ReqlineError> for ApiError {
    fn from(err: ReqlineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_exposable() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_exposable() {
            tracing::debug!(error = %self.0, "rejected reqline");
            self.0.message()
        } else {
            tracing::error!(error = %self.0, "unclassified failure");
            INTERNAL_MESSAGE
        };
        (
            status,
            Json(ErrorBody {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_reqline_string() {
        let line = extract_reqline(br#"{"reqline":"HTTP GET | URL http://x"}"#).unwrap();
        assert_eq!(line, "HTTP GET | URL http://x");
    }

    #[test]
    fn missing_or_blank_reqline() {
        let bodies: [&[u8]; 4] = [b"", b"{}", br#"{"reqline":"  "}"#, br#"{"reqline":42}"#];
        for body in bodies {
            let err = extract_reqline(body).unwrap_err();
            assert!(err.is_exposable());
            assert_eq!(err.message(), "Missing reqline in request body");
        }
    }

    #[test]
    fn malformed_body() {
        let err = extract_reqline(b"{not json").unwrap_err();
        assert_eq!(err.message(), "Invalid JSON request body");
    }

    #[test]
    fn status_follows_exposable_flag() {
        assert_eq!(
            ApiError::from(ReqlineError::exposed("x")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ReqlineError::internal("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
