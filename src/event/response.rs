//! Outbound handler responses

use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;

/// Cross-origin header attached to every response
pub const CORS_ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");

/// The structured output a handler returns to the invoking gateway
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// JSON-encoded body
    pub body: String,
}

impl HandlerResponse {
    /// Serialize `body` and build a response with the given status
    pub fn json(status_code: u16, body: &impl Serialize) -> Self {
        let body =
            serde_json::to_string(body).expect("handler response serialization cannot fail");
        let mut headers = HashMap::new();
        headers.insert(CORS_ALLOW_ORIGIN.0.to_string(), CORS_ALLOW_ORIGIN.1.to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// 200 with a serialized body
    pub fn ok(body: &impl Serialize) -> Self {
        Self::json(200, body)
    }

    /// 201 with a serialized body
    pub fn created(body: &impl Serialize) -> Self {
        Self::json(201, body)
    }

    /// `{"message": ...}` body with the given status
    pub fn message(status_code: u16, text: impl Into<String>) -> Self {
        Self::json(status_code, &json!({ "message": text.into() }))
    }

    /// `{"error": ...}` body with the given status
    pub fn error(status_code: u16, text: impl Into<String>) -> Self {
        Self::json(status_code, &json!({ "error": text.into() }))
    }

    /// Parsed body, for assertions
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("handler response body is always JSON")
    }
}
