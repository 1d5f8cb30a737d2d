//! Middleware for the swimrec server
//!
//! This module provides middleware for:
//! - CORS (Cross-Origin Resource Sharing) and preflight dispatch
//! - Request logging with tracing
//! - JSON content negotiation

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    Router,
};
use std::time::Duration;
use tower::ServiceExt;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::CorsConfig;

pub mod content_negotiation;

pub use content_negotiation::{require_json_accept, require_json_content_type};

/// Create CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .max_age(Duration::from_secs(3600));

    if config.is_wildcard() {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);

        // tower-http rejects credentials combined with a wildcard origin
        if config.allow_credentials {
            cors = cors.allow_credentials(true);
        }
    }

    cors
}

/// True for a CORS preflight: `OPTIONS` carrying `Access-Control-Request-Method`
pub fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// State for [`dispatch_cors`]
#[derive(Clone)]
pub struct CorsDispatch {
    /// The application wrapped in [`cors_layer`]
    pub with_cors: Router,
    pub config: CorsConfig,
}

/// `Access-Control-Allow-Origin` value for a request from `origin`
///
/// Mirrors what [`cors_layer`] sends: `*` for a wildcard configuration,
/// otherwise the origin itself when it is in the allowed list.
pub fn allowed_origin(config: &CorsConfig, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
    if config.is_wildcard() {
        return Some(HeaderValue::from_static("*"));
    }

    let origin = origin?;
    config
        .allowed_origins
        .iter()
        .any(|allowed| allowed.as_bytes() == origin.as_bytes())
        .then(|| origin.clone())
}

/// Send every request except a bare `OPTIONS` through the CORS layer
///
/// `CorsLayer` answers any `OPTIONS` request on its own. Plain `OPTIONS`
/// requests skip it and reach the per-route handlers, which advertise the
/// methods of that route; the allowed origin is added here instead.
pub async fn dispatch_cors(
    State(dispatch): State<CorsDispatch>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS && !is_preflight(&request) {
        let origin = allowed_origin(&dispatch.config, request.headers().get(header::ORIGIN));
        let mut response = next.run(request).await;

        if let Some(origin) = origin {
            let headers = response.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            if dispatch.config.allow_credentials && !dispatch.config.is_wildcard() {
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                );
            }
        }
        return response;
    }

    match dispatch.with_cors.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Create tracing/logging layer
pub fn tracing_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
}
