//! Handler response to HTTP response conversion

use axum::body::Body;
use axum::http::header;
use axum::response::Response;

use crate::event::HandlerResponse;

/// Carry status, headers, and the JSON body through unchanged.
pub(super) fn into_http(resp: HandlerResponse) -> Response {
    let mut builder = Response::builder()
        .status(resp.status_code)
        .header(header::CONTENT_TYPE, "application/json");
    for (name, value) in &resp.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Body::from(resp.body))
        .expect("handler responses always convert to HTTP responses")
}
