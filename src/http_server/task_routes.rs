//! Task HTTP routes
//!
//! `GET|POST|PUT|DELETE /tasks` and `PUT /tasks/{id}/complete`, all thin
//! adapters from HTTP parts to the pure task handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;

use crate::event::RequestEvent;
use crate::handlers;
use crate::store::TaskRepository;

use super::gateway::into_http;

/// Task repository shared across task routes
pub struct TasksState<R> {
    pub repo: R,
}

/// Create the task routes
pub fn task_routes<R>(repo: R) -> Router
where
    R: TaskRepository + 'static,
{
    let state = Arc::new(TasksState { repo });
    Router::new()
        .route(
            "/tasks",
            get(list::<R>)
                .post(create::<R>)
                .put(update::<R>)
                .delete(remove::<R>),
        )
        .route("/tasks/{id}/complete", put(complete::<R>))
        .with_state(state)
}

async fn create<R: TaskRepository>(
    State(state): State<Arc<TasksState<R>>>,
    body: String,
) -> Response {
    let event = RequestEvent::new().with_body(body);
    into_http(handlers::create_task(&state.repo, &event).await)
}

async fn update<R: TaskRepository>(
    State(state): State<Arc<TasksState<R>>>,
    body: String,
) -> Response {
    let event = RequestEvent::new().with_body(body);
    into_http(handlers::update_task(&state.repo, &event).await)
}

async fn complete<R: TaskRepository>(
    State(state): State<Arc<TasksState<R>>>,
    Path(id): Path<String>,
) -> Response {
    let event = RequestEvent::new().with_path("id", id);
    into_http(handlers::complete_task(&state.repo, &event).await)
}

async fn remove<R: TaskRepository>(
    State(state): State<Arc<TasksState<R>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let event = RequestEvent::from_parts(query, HashMap::new(), None);
    into_http(handlers::delete_task(&state.repo, &event).await)
}

async fn list<R: TaskRepository>(
    State(state): State<Arc<TasksState<R>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let event = RequestEvent::from_parts(query, HashMap::new(), None);
    into_http(handlers::list_tasks(&state.repo, &event).await)
}
