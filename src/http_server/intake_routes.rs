//! Intake form HTTP route

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::Router;

use crate::event::RequestEvent;
use crate::handlers;
use crate::store::IntakeRepository;

use super::gateway::into_http;

/// Intake repository shared across intake routes
pub struct IntakeState<R> {
    pub repo: R,
}

/// Create the intake form routes
pub fn intake_routes<R>(repo: R) -> Router
where
    R: IntakeRepository + 'static,
{
    let state = Arc::new(IntakeState { repo });
    Router::new()
        .route("/intake-forms", post(submit::<R>))
        .with_state(state)
}

async fn submit<R: IntakeRepository>(
    State(state): State<Arc<IntakeState<R>>>,
    body: String,
) -> Response {
    let event = RequestEvent::new().with_body(body);
    into_http(handlers::submit_intake_form(&state.repo, &event).await)
}
