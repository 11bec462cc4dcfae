//! Task endpoints
//!
//! Create, full update, status-only update, delete, and listing. Write
//! handlers report 404 when the id matches zero rows.

use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::event::{HandlerResponse, RequestEvent};
use crate::store::{NewTask, TaskRepository, TaskUpdate};

use super::errors::{HandlerError, HandlerResult};
use super::{parse_id, require};

/// Create-task request body; `care_plan_id` and a non-empty `title` are
/// required, everything else has a server-side default.
#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    care_plan_id: Option<u64>,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    updated_by: Option<String>,
}

/// Full-update request body
#[derive(Debug, Deserialize)]
struct UpdateTaskBody {
    id: Option<u64>,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// Insert one task and return the created record with 201.
pub async fn create_task<R: TaskRepository>(repo: &R, event: &RequestEvent) -> HandlerResponse {
    try_create(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_create<R: TaskRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let body: CreateTaskBody = event.json_body()?;
    let task = NewTask {
        care_plan_id: require(body.care_plan_id, "care_plan_id")?,
        title: require(body.title.filter(|t| !t.is_empty()), "title")?,
        description: body.description.unwrap_or_default(),
        status: body.status.unwrap_or_else(|| "pending".to_string()),
        updated_by: body.updated_by,
    };

    let id = repo.insert(&task).await?;
    tracing::info!(id, care_plan_id = task.care_plan_id, "task created");

    Ok(HandlerResponse::created(&json!({
        "id": id,
        "care_plan_id": task.care_plan_id,
        "title": task.title,
        "description": task.description,
        "status": task.status,
        "updated_by": task.updated_by,
        "updated_at": Utc::now().naive_utc(),
    })))
}

/// Overwrite every mutable column of one task; 404 when the id is unknown.
pub async fn update_task<R: TaskRepository>(repo: &R, event: &RequestEvent) -> HandlerResponse {
    try_update(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_update<R: TaskRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let body: UpdateTaskBody = event.json_body()?;
    let update = TaskUpdate {
        id: require(body.id, "id")?,
        title: require(body.title.filter(|t| !t.is_empty()), "title")?,
        description: body.description,
        status: require(body.status, "status")?,
        start: parse_datetime("start", &require(body.start, "start")?)?,
        end: parse_datetime("end", &require(body.end, "end")?)?,
    };

    let affected = repo.update(&update).await?;
    if affected == 0 {
        return Err(HandlerError::NotFound {
            entity: "Task",
            id: update.id,
        });
    }

    Ok(HandlerResponse::message(
        200,
        format!("Task with id {} updated successfully.", update.id),
    ))
}

/// Mark one task completed; the status value is fixed, only the id comes
/// from the request.
pub async fn complete_task<R: TaskRepository>(repo: &R, event: &RequestEvent) -> HandlerResponse {
    try_complete(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_complete<R: TaskRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let id = parse_id("id", event.require_path("id")?)?;

    let affected = repo.set_status(id, "completed").await?;
    if affected == 0 {
        return Err(HandlerError::NotFound { entity: "Task", id });
    }

    Ok(HandlerResponse::message(
        200,
        format!("Task with id {} marked completed.", id),
    ))
}

/// Remove one task by id from the query string.
pub async fn delete_task<R: TaskRepository>(repo: &R, event: &RequestEvent) -> HandlerResponse {
    try_delete(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_delete<R: TaskRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let id = parse_id("id", event.require_query("id")?)?;

    let affected = repo.delete(id).await?;
    if affected == 0 {
        return Err(HandlerError::NotFound { entity: "Task", id });
    }
    tracing::info!(id, "task deleted");

    Ok(HandlerResponse::message(
        200,
        format!("Task with id {} deleted successfully.", id),
    ))
}

/// All tasks, or the tasks of one care plan when `care_plan_id` is given.
/// The response is a bare JSON array of rows.
pub async fn list_tasks<R: TaskRepository>(repo: &R, event: &RequestEvent) -> HandlerResponse {
    try_list(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_list<R: TaskRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let care_plan_id = match event.query("care_plan_id") {
        Some(raw) if !raw.is_empty() => Some(parse_id("care_plan_id", raw)?),
        _ => None,
    };

    let tasks = repo.list(care_plan_id).await?;
    Ok(HandlerResponse::ok(&tasks))
}

/// MySQL DATETIME or the T-separated variant.
fn parse_datetime(name: &'static str, raw: &str) -> HandlerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| HandlerError::InvalidField {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTaskRepository;

    fn body_event(body: serde_json::Value) -> RequestEvent {
        RequestEvent::new().with_body(body.to_string())
    }

    #[tokio::test]
    async fn test_create_missing_title_writes_nothing() {
        let repo = InMemoryTaskRepository::new();
        let resp = create_task(&repo, &body_event(json!({ "care_plan_id": 7 }))).await;
        assert_eq!(resp.status_code, 400);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_empty_title_counts_as_missing() {
        let repo = InMemoryTaskRepository::new();
        let resp =
            create_task(&repo, &body_event(json!({ "care_plan_id": 7, "title": "" }))).await;
        assert_eq!(resp.status_code, 400);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let repo = InMemoryTaskRepository::new();
        let resp = create_task(
            &repo,
            &body_event(json!({ "care_plan_id": 7, "title": "Call patient" })),
        )
        .await;

        assert_eq!(resp.status_code, 201);
        let body = resp.body_json();
        assert_eq!(body["status"], json!("pending"));
        assert_eq!(body["description"], json!(""));
        assert_eq!(body["care_plan_id"], json!(7));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_malformed_body_writes_nothing() {
        let repo = InMemoryTaskRepository::new();
        let resp = create_task(&repo, &RequestEvent::new().with_body("{not json")).await;
        assert_eq!(resp.status_code, 400);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_delete_existing_then_missing() {
        let repo = InMemoryTaskRepository::new();
        repo.seed(crate::store::Task {
            id: 42,
            care_plan_id: 7,
            title: "t".into(),
            description: None,
            status: "pending".into(),
            start: None,
            end: None,
            updated_by: None,
            updated_at: None,
        });

        let event = RequestEvent::new().with_query("id", "42");
        let resp = delete_task(&repo, &event).await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(
            resp.body_json()["message"],
            json!("Task with id 42 deleted successfully.")
        );

        let resp = delete_task(&repo, &event).await;
        assert_eq!(resp.status_code, 404);
        assert_eq!(
            resp.body_json()["message"],
            json!("Task with id 42 not found.")
        );
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let repo = InMemoryTaskRepository::new();
        let resp = delete_task(&repo, &RequestEvent::new()).await;
        assert_eq!(resp.status_code, 400);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_404_and_repeat_is_200() {
        let repo = InMemoryTaskRepository::new();
        let body = json!({
            "id": 1,
            "title": "Call patient",
            "status": "pending",
            "start": "2025-06-01 09:00:00",
            "end": "2025-06-01 10:00:00",
        });

        let resp = update_task(&repo, &body_event(body.clone())).await;
        assert_eq!(resp.status_code, 404);

        create_task(
            &repo,
            &body_event(json!({ "care_plan_id": 7, "title": "Call patient" })),
        )
        .await;

        // Identical updates keep returning 200; the row still matches.
        let resp = update_task(&repo, &body_event(body.clone())).await;
        assert_eq!(resp.status_code, 200);
        let resp = update_task(&repo, &body_event(body)).await;
        assert_eq!(resp.status_code, 200);
    }

    #[tokio::test]
    async fn test_update_rejects_unparseable_datetime() {
        let repo = InMemoryTaskRepository::new();
        let resp = update_task(
            &repo,
            &body_event(json!({
                "id": 1,
                "title": "t",
                "status": "pending",
                "start": "tomorrow",
                "end": "2025-06-01 10:00:00",
            })),
        )
        .await;
        assert_eq!(resp.status_code, 400);
    }

    #[tokio::test]
    async fn test_complete_sets_fixed_status() {
        let repo = InMemoryTaskRepository::new();
        create_task(
            &repo,
            &body_event(json!({ "care_plan_id": 7, "title": "Call patient" })),
        )
        .await;

        let event = RequestEvent::new().with_path("id", "1");
        let resp = complete_task(&repo, &event).await;
        assert_eq!(resp.status_code, 200);

        let tasks = repo.list(None).await.unwrap();
        assert_eq!(tasks[0].status, "completed");
    }

    #[tokio::test]
    async fn test_complete_unknown_id_is_404() {
        let repo = InMemoryTaskRepository::new();
        let event = RequestEvent::new().with_path("id", "9");
        let resp = complete_task(&repo, &event).await;
        assert_eq!(resp.status_code, 404);
    }

    #[tokio::test]
    async fn test_list_filters_and_defaults_to_all() {
        let repo = InMemoryTaskRepository::new();
        create_task(&repo, &body_event(json!({ "care_plan_id": 1, "title": "a" }))).await;
        create_task(&repo, &body_event(json!({ "care_plan_id": 2, "title": "b" }))).await;

        let all = list_tasks(&repo, &RequestEvent::new()).await;
        assert_eq!(all.body_json().as_array().unwrap().len(), 2);

        let one = list_tasks(&repo, &RequestEvent::new().with_query("care_plan_id", "2")).await;
        assert_eq!(one.body_json().as_array().unwrap().len(), 1);

        let none = list_tasks(&repo, &RequestEvent::new().with_query("care_plan_id", "3")).await;
        assert_eq!(none.status_code, 200);
        assert!(none.body_json().as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_500() {
        let repo = InMemoryTaskRepository::new();
        repo.fail_with("Connection lost");
        let resp = list_tasks(&repo, &RequestEvent::new()).await;
        assert_eq!(resp.status_code, 500);
        assert!(resp.body_json()["error"]
            .as_str()
            .unwrap()
            .contains("Connection lost"));
    }
}
