//! Inbound request events

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::handlers::HandlerError;

/// The structured input a handler receives from the invoking gateway
#[derive(Debug, Clone, Default)]
pub struct RequestEvent {
    query: HashMap<String, String>,
    path: HashMap<String, String>,
    body: Option<String>,
}

impl RequestEvent {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an event from gateway parts
    pub fn from_parts(
        query: HashMap<String, String>,
        path: HashMap<String, String>,
        body: Option<String>,
    ) -> Self {
        Self { query, path, body }
    }

    /// Add a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add a path parameter
    pub fn with_path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Attach a raw request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Optional query parameter
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Optional path parameter
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    /// Raw body, if any
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Required query parameter; empty values count as absent.
    pub fn require_query(&self, name: &'static str) -> Result<&str, HandlerError> {
        match self.query(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(HandlerError::MissingField(name)),
        }
    }

    /// Required path parameter; empty values count as absent.
    pub fn require_path(&self, name: &'static str) -> Result<&str, HandlerError> {
        match self.path_param(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(HandlerError::MissingField(name)),
        }
    }

    /// Parse the JSON body into `T`. An absent or malformed body fails
    /// before any data-store access happens.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let raw = self
            .body
            .as_deref()
            .ok_or_else(|| HandlerError::InvalidJson("request body is missing".to_string()))?;
        serde_json::from_str(raw).map_err(|e| HandlerError::InvalidJson(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        name: String,
    }

    #[test]
    fn test_require_query_present() {
        let event = RequestEvent::new().with_query("id", "42");
        assert_eq!(event.require_query("id").unwrap(), "42");
    }

    #[test]
    fn test_require_query_missing() {
        let event = RequestEvent::new();
        let err = event.require_query("id").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_require_query_empty_counts_as_missing() {
        let event = RequestEvent::new().with_query("id", "");
        assert!(event.require_query("id").is_err());
    }

    #[test]
    fn test_json_body_parses() {
        let event = RequestEvent::new().with_body(r#"{"name": "Alice"}"#);
        let body: Body = event.json_body().unwrap();
        assert_eq!(body.name, "Alice");
    }

    #[test]
    fn test_json_body_malformed() {
        let event = RequestEvent::new().with_body("{not json");
        let err = event.json_body::<Body>().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_json_body_absent() {
        let event = RequestEvent::new();
        let err = event.json_body::<Body>().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
