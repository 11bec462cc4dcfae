//! Handler error types.

use thiserror::Error;

use crate::event::HandlerResponse;
use crate::store::StoreError;

/// Result type for the fallible steps inside a handler
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Everything that can cut a request short
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required field is absent from the request
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The request body is absent or not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// A field is present but cannot be interpreted
    #[error("Invalid value for {name}: {value}")]
    InvalidField { name: &'static str, value: String },

    /// An update or delete matched zero rows
    #[error("{entity} with id {id} not found.")]
    NotFound { entity: &'static str, id: u64 },

    /// The data store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HandlerError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::InvalidJson(_) | Self::InvalidField { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Store(_) => 500,
        }
    }

    /// Map to the response the caller sees. Not-found uses the `message`
    /// key; everything else uses `error`.
    pub fn into_response(self) -> HandlerResponse {
        match self {
            Self::NotFound { .. } => HandlerResponse::message(404, self.to_string()),
            Self::Store(e) => {
                tracing::error!(error = %e, "data store operation failed");
                HandlerResponse::error(500, format!("Internal Server Error: {}", e))
            }
            other => HandlerResponse::error(other.status_code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(HandlerError::MissingField("title").status_code(), 400);
        assert_eq!(
            HandlerError::NotFound {
                entity: "Task",
                id: 42
            }
            .status_code(),
            404
        );
        assert_eq!(
            HandlerError::Store(StoreError::query("boom")).status_code(),
            500
        );
    }

    #[test]
    fn test_not_found_uses_message_key() {
        let resp = HandlerError::NotFound {
            entity: "Task",
            id: 42,
        }
        .into_response();
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body_json()["message"], json!("Task with id 42 not found."));
    }

    #[test]
    fn test_store_error_preserves_underlying_text() {
        let resp = HandlerError::Store(StoreError::connection("timed out")).into_response();
        assert_eq!(resp.status_code, 500);
        let error = resp.body_json()["error"].as_str().unwrap().to_string();
        assert!(error.starts_with("Internal Server Error:"));
        assert!(error.contains("timed out"));
    }

    #[test]
    fn test_validation_error_uses_error_key() {
        let resp = HandlerError::MissingField("care_plan_id").into_response();
        assert_eq!(resp.status_code, 400);
        assert_eq!(
            resp.body_json()["error"],
            json!("Missing required field: care_plan_id")
        );
    }
}
