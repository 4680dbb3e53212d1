// src/api.rs
//! HTTP surface: routing, request parsing and response mapping.

use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::types::{EnumerateRequest, EnumerationResponse, ErrorResponse, RustFinderError};
use crate::{NAME, VERSION};
use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

pub const BUILD_TIME: &str = match option_env!("BUILD_TIME") {
    Some(time) => time,
    None => "unknown",
};

pub const GIT_HASH: &str = match option_env!("GIT_HASH") {
    Some(hash) => hash,
    None => "unknown",
};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(docs_handler).fallback(method_not_allowed))
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .route(
            "/enumerate",
            post(enumerate_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/enumerate/batch",
            post(enumerate_batch_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(cors)
        // Allowed methods and headers go on every response, not only preflight.
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .with_state(AppState { orchestrator })
}

#[derive(Serialize)]
pub struct HealthResponse {
    success: bool,
    message: String,
    version: String,
    git_hash: String,
    build_time: String,
    timestamp: DateTime<Utc>,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "RustFinder API is running".to_string(),
        version: VERSION.to_string(),
        git_hash: GIT_HASH.to_string(),
        build_time: BUILD_TIME.to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn docs_handler() -> Json<Value> {
    let example_options = json!({
        "threads": 10,
        "timeout": 30,
        "max_enumeration_time": 10,
        "all": true,
        "only_recursive": false,
    });

    Json(json!({
        "name": NAME,
        "version": VERSION,
        "description": "REST API for passive subdomain enumeration",
        "endpoints": {
            "GET /health": "Health check endpoint",
            "POST /enumerate": "Enumerate subdomains for a single domain",
            "POST /enumerate/batch": "Enumerate subdomains for multiple domains",
        },
        "example_single_domain": {
            "domain": "hackerone.com",
            "options": example_options,
        },
        "example_batch": {
            "domains": ["hackerone.com", "bugcrowd.com"],
            "options": example_options,
        },
    }))
}

pub async fn enumerate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnumerationResponse>> {
    let request = parse_request(&body)?;
    let config = state.orchestrator.engine_config(request.options.as_ref());
    let response = state.orchestrator.enumerate(&request.domain, &config).await?;
    Ok(Json(response))
}

pub async fn enumerate_batch_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnumerationResponse>> {
    let request = parse_request(&body)?;
    let config = state.orchestrator.engine_config(request.options.as_ref());
    let response = state
        .orchestrator
        .enumerate_batch(&request.domains, &config)
        .await?;
    Ok(Json(response))
}

fn parse_request(body: &[u8]) -> Result<EnumerateRequest> {
    serde_json::from_slice(body)
        .map_err(|_| RustFinderError::InvalidInput("Invalid JSON payload".to_string()))
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_shapes() {
        let single = parse_request(br#"{"domain": "example.com"}"#).unwrap();
        assert_eq!(single.domain, "example.com");
        assert!(single.domains.is_empty());
        assert!(single.options.is_none());

        let batch =
            parse_request(br#"{"domains": ["a.com", "b.com"], "options": {"threads": 5, "all": true}}"#)
                .unwrap();
        assert_eq!(batch.domains, vec!["a.com", "b.com"]);
        let options = batch.options.unwrap();
        assert_eq!(options.threads, 5);
        assert_eq!(options.timeout, 0);
        assert!(options.all);
    }

    #[test]
    fn test_parse_request_rejects_malformed_json() {
        let err = parse_request(b"{not json").unwrap_err();
        assert!(matches!(err, RustFinderError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid JSON payload");

        let err = parse_request(br#"{"domains": "a.com"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON payload");
    }
}
