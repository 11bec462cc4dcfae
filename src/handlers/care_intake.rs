//! Care-intake questionnaire endpoint
//!
//! The long-form questionnaire lands in the relational store as one row.
//! Only `client_username` is required; every other answer may be blank.

use crate::event::{HandlerResponse, RequestEvent};
use crate::store::{CareIntakeRecord, CareIntakeRepository};

use super::errors::{HandlerError, HandlerResult};

/// Store one care-intake questionnaire submission.
pub async fn submit_care_intake<R: CareIntakeRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResponse {
    try_submit(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_submit<R: CareIntakeRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let record: CareIntakeRecord = event.json_body()?;
    if record.client_username.is_empty() {
        return Err(HandlerError::MissingField("client_username"));
    }

    repo.insert(&record).await?;
    tracing::info!(client = %record.client_username, "care intake stored");

    Ok(HandlerResponse::message(
        200,
        "Care intake submitted successfully.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCareIntakeRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_stores_one_row() {
        let repo = InMemoryCareIntakeRepository::new();
        let event = RequestEvent::new().with_body(
            json!({
                "client_username": "amrita",
                "full_name": "Amrita Shah",
                "current_medical_conditions_diabetes": true,
                "additional_notes": "prefers morning visits",
            })
            .to_string(),
        );

        let resp = submit_care_intake(&repo, &event).await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(
            resp.body_json()["message"],
            json!("Care intake submitted successfully.")
        );

        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].client_username, "amrita");
        assert_eq!(rows[0].current_medical_conditions_diabetes, Some(true));
    }

    #[tokio::test]
    async fn test_client_username_is_required() {
        let repo = InMemoryCareIntakeRepository::new();
        let event = RequestEvent::new().with_body(json!({ "full_name": "x" }).to_string());
        let resp = submit_care_intake(&repo, &event).await;
        assert_eq!(resp.status_code, 400);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let repo = InMemoryCareIntakeRepository::new();
        repo.fail_with("table care_intake missing");
        let event =
            RequestEvent::new().with_body(json!({ "client_username": "amrita" }).to_string());
        let resp = submit_care_intake(&repo, &event).await;
        assert_eq!(resp.status_code, 500);
    }
}
