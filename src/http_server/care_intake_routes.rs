//! Care-intake questionnaire HTTP route

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::Router;

use crate::event::RequestEvent;
use crate::handlers;
use crate::store::CareIntakeRepository;

use super::gateway::into_http;

/// Care-intake repository shared across care-intake routes
pub struct CareIntakeState<R> {
    pub repo: R,
}

/// Create the care-intake routes
pub fn care_intake_routes<R>(repo: R) -> Router
where
    R: CareIntakeRepository + 'static,
{
    let state = Arc::new(CareIntakeState { repo });
    Router::new()
        .route("/care-intake", post(submit::<R>))
        .with_state(state)
}

async fn submit<R: CareIntakeRepository>(
    State(state): State<Arc<CareIntakeState<R>>>,
    body: String,
) -> Response {
    let event = RequestEvent::new().with_body(body);
    into_http(handlers::submit_care_intake(&state.repo, &event).await)
}
