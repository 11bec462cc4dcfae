//! Care plan HTTP routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::event::RequestEvent;
use crate::handlers;
use crate::store::CarePlanRepository;

use super::gateway::into_http;

/// Care plan repository shared across care plan routes
pub struct CarePlansState<R> {
    pub repo: R,
}

/// Create the care plan routes
pub fn care_plan_routes<R>(repo: R) -> Router
where
    R: CarePlanRepository + 'static,
{
    let state = Arc::new(CarePlansState { repo });
    Router::new()
        .route("/care-plans", get(for_client::<R>))
        .route("/care-plans/navigator", get(for_navigator::<R>))
        .with_state(state)
}

async fn for_client<R: CarePlanRepository>(
    State(state): State<Arc<CarePlansState<R>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let event = RequestEvent::from_parts(query, HashMap::new(), None);
    into_http(handlers::list_care_plans_for_client(&state.repo, &event).await)
}

async fn for_navigator<R: CarePlanRepository>(
    State(state): State<Arc<CarePlansState<R>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let event = RequestEvent::from_parts(query, HashMap::new(), None);
    into_http(handlers::list_care_plans_for_navigator(&state.repo, &event).await)
}
