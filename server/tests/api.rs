use std::sync::{Arc, Mutex};

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use reqline_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use reqline_server::{app, app_with_transport};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Answers every request with `{status: 200, data: {"ok": true}}` and
/// remembers what it was asked to send.
#[derive(Default)]
struct CannedTransport {
    sent: Mutex<Vec<HttpRequest>>,
}

impl Transport for CannedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: 200,
            data: json!({"ok": true}),
        })
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("getaddrinfo ENOTFOUND nowhere.invalid"))
    }
}

/// Panics inside the blocking worker, as a defect in a transport would.
struct PanickingTransport;

impl Transport for PanickingTransport {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        panic!("secret internal detail");
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn reqline_request(reqline: &str) -> Request<String> {
    json_request(&json!({ "reqline": reqline }).to_string())
}

fn json_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

#[tokio::test]
async fn valid_get_returns_envelope() {
    let transport = Arc::new(CannedTransport::default());
    let resp = app_with_transport(transport.clone())
        .oneshot(reqline_request(
            r#"HTTP GET | URL http://x/items | QUERY {"q":"hi","n":null}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["request"]["full_url"], "http://x/items?q=hi");
    assert_eq!(body["request"]["query"], json!({"q": "hi", "n": null}));
    assert_eq!(body["request"]["headers"], json!({}));
    assert_eq!(body["response"]["http_status"], 200);
    assert_eq!(body["response"]["response_data"], json!({"ok": true}));
    let start = body["response"]["request_start_timestamp"].as_u64().unwrap();
    let stop = body["response"]["request_stop_timestamp"].as_u64().unwrap();
    assert!(stop >= start);
    assert_eq!(body["response"]["duration"].as_u64().unwrap(), stop - start);

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].body, None);
}

#[tokio::test]
async fn post_forwards_body() {
    let transport = Arc::new(CannedTransport::default());
    let resp = app_with_transport(transport.clone())
        .oneshot(reqline_request(r#"HTTP POST | URL http://x | BODY {"a":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["request"]["body"], json!({"a": 1}));
    assert_eq!(transport.sent.lock().unwrap()[0].body, Some(json!({"a": 1})));
}

#[tokio::test]
async fn grammar_error_is_400_with_message() {
    let transport = Arc::new(CannedTransport::default());
    let resp = app_with_transport(transport.clone())
        .oneshot(reqline_request("HTTP get | URL http://x"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": true, "message": "HTTP method must be uppercase"})
    );
    assert!(transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transport_failure_is_400_with_message() {
    let resp = app_with_transport(Arc::new(FailingTransport))
        .oneshot(reqline_request("HTTP GET | URL http://nowhere.invalid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "getaddrinfo ENOTFOUND nowhere.invalid");
}

#[tokio::test]
async fn missing_reqline_is_400() {
    let resp = app().oneshot(json_request("{}")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Missing reqline in request body");
}

#[tokio::test]
async fn malformed_request_body_is_400() {
    let resp = app().oneshot(json_request("{reqline")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Invalid JSON request body");
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unclassified_failure_is_500_without_leaking_the_message() {
    let resp = app_with_transport(Arc::new(PanickingTransport))
        .oneshot(reqline_request("HTTP GET | URL http://x"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": true, "message": "Internal server error"})
    );
}

#[tokio::test]
async fn unparseable_base_url_is_500() {
    let transport = Arc::new(CannedTransport::default());
    let resp = app_with_transport(transport.clone())
        .oneshot(reqline_request("HTTP GET | URL not-a-url"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": true, "message": "Internal server error"})
    );
    assert!(transport.sent.lock().unwrap().is_empty());
}
