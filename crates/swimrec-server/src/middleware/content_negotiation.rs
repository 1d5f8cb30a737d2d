//! JSON content negotiation guards
//!
//! Both guards run as `axum::middleware::from_fn` layers and answer with the
//! standard `{ "error": ... }` body.

use axum::{
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use mime::Mime;

use crate::api::response::ErrorResponse;

/// True when a single media range from `Accept` admits `application/json`
fn range_admits_json(range: &str) -> bool {
    let Ok(mime) = range.trim().parse::<Mime>() else {
        return false;
    };

    let refused = mime
        .get_param("q")
        .and_then(|q| q.as_str().parse::<f32>().ok())
        .is_some_and(|q| q <= 0.0);
    if refused {
        return false;
    }

    let (ty, sub) = (mime.type_(), mime.subtype());
    (ty == mime::STAR && sub == mime::STAR)
        || (ty == mime::APPLICATION && (sub == mime::STAR || sub == mime::JSON))
}

/// A request without `Accept` takes anything
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(header::ACCEPT).iter().peekable();
    if values.peek().is_none() {
        return true;
    }

    values
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(range_admits_json)
}

pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Mime>().ok())
        .is_some_and(|m| m.essence_str() == mime::APPLICATION_JSON.essence_str())
}

/// Reject non-OPTIONS requests that cannot take a JSON response (406)
pub async fn require_json_accept(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS && !accepts_json(request.headers()) {
        tracing::debug!(uri = %request.uri(), "Rejected non-JSON Accept header");
        return ErrorResponse::new("Only JSON is allowed as Accept header")
            .with_status(StatusCode::NOT_ACCEPTABLE);
    }

    next.run(request).await
}

/// Reject POST and PUT bodies that are not declared as JSON (415)
pub async fn require_json_content_type(request: Request, next: Next) -> Response {
    let needs_json = matches!(*request.method(), Method::POST | Method::PUT);

    if needs_json && !is_json_content_type(request.headers()) {
        tracing::debug!(uri = %request.uri(), "Rejected non-JSON Content-Type");
        return ErrorResponse::new("Content-Type must be application/json")
            .with_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    next.run(request).await
}
