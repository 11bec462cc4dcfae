//! Care plan endpoints
//!
//! Read-only. An unknown client or navigator yields 200 with an empty
//! collection, never 404.

use serde_json::json;

use crate::event::{HandlerResponse, RequestEvent};
use crate::store::CarePlanRepository;

use super::errors::{HandlerError, HandlerResult};
use super::parse_id;

/// Care plans of one client, newest first, under the `care_plans` key.
pub async fn list_care_plans_for_client<R: CarePlanRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResponse {
    try_list_for_client(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_list_for_client<R: CarePlanRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let client_username = event.require_query("client_username")?;
    let plans = repo.list_for_client(client_username).await?;
    Ok(HandlerResponse::ok(&json!({ "care_plans": plans })))
}

/// Care plans assigned to one navigator, under the `data` key.
pub async fn list_care_plans_for_navigator<R: CarePlanRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResponse {
    try_list_for_navigator(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_list_for_navigator<R: CarePlanRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let care_navigator_id = parse_id(
        "care_navigator_id",
        event.require_query("care_navigator_id")?,
    )?;
    let plans = repo.list_for_navigator(care_navigator_id).await?;
    Ok(HandlerResponse::ok(&json!({ "data": plans })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CarePlanRow, InMemoryCarePlanRepository};

    fn seeded() -> InMemoryCarePlanRepository {
        let repo = InMemoryCarePlanRepository::new();
        repo.seed(CarePlanRow {
            id: 1,
            client_username: "amrita".to_string(),
            care_navigator_id: 10,
            care_plan_name: Some("Post-surgery recovery".to_string()),
            ..Default::default()
        });
        repo
    }

    #[tokio::test]
    async fn test_client_listing_shape() {
        let repo = seeded();
        let event = RequestEvent::new().with_query("client_username", "amrita");
        let resp = list_care_plans_for_client(&repo, &event).await;

        assert_eq!(resp.status_code, 200);
        let plans = resp.body_json()["care_plans"].as_array().unwrap().clone();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0]["care_plan_name"], "Post-surgery recovery");
    }

    #[tokio::test]
    async fn test_unknown_client_yields_empty_200() {
        let repo = seeded();
        let event = RequestEvent::new().with_query("client_username", "nobody");
        let resp = list_care_plans_for_client(&repo, &event).await;

        assert_eq!(resp.status_code, 200);
        assert!(resp.body_json()["care_plans"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_client_username_is_required() {
        let repo = seeded();
        let resp = list_care_plans_for_client(&repo, &RequestEvent::new()).await;
        assert_eq!(resp.status_code, 400);
        assert!(resp.body_json()["error"]
            .as_str()
            .unwrap()
            .contains("client_username"));
    }

    #[tokio::test]
    async fn test_navigator_listing_shape() {
        let repo = seeded();
        let event = RequestEvent::new().with_query("care_navigator_id", "10");
        let resp = list_care_plans_for_navigator(&repo, &event).await;

        assert_eq!(resp.status_code, 200);
        let data = resp.body_json()["data"].as_array().unwrap().clone();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["client_username"], "amrita");
    }

    #[tokio::test]
    async fn test_navigator_id_must_be_numeric() {
        let repo = seeded();
        let event = RequestEvent::new().with_query("care_navigator_id", "ten");
        let resp = list_care_plans_for_navigator(&repo, &event).await;
        assert_eq!(resp.status_code, 400);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let repo = seeded();
        repo.fail_with("too many connections");
        let event = RequestEvent::new().with_query("client_username", "amrita");
        let resp = list_care_plans_for_client(&repo, &event).await;
        assert_eq!(resp.status_code, 500);
    }
}
