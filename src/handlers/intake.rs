//! Intake form endpoint
//!
//! Submissions are written once under a server-generated `form_id`, which
//! the response returns as `formId`. No field is required; the stored item
//! carries whatever the form sent plus the id and a submission timestamp.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::event::{HandlerResponse, RequestEvent};
use crate::store::{IntakeForm, IntakeRepository};

use super::errors::{HandlerError, HandlerResult};

/// Submitted form fields, all optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IntakeFormBody {
    full_name: Option<String>,
    date_of_birth: Option<String>,
    gender: Option<String>,
    contact_number: Option<String>,
    home_address: Option<String>,
    conditions: Vec<String>,
    other_condition: Option<String>,
    allergies: Option<String>,
    medications: Option<String>,
    surgeries: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_number: Option<String>,
    relationship: Option<String>,
}

/// Store one intake form submission.
pub async fn submit_intake_form<R: IntakeRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResponse {
    try_submit(repo, event)
        .await
        .unwrap_or_else(HandlerError::into_response)
}

async fn try_submit<R: IntakeRepository>(
    repo: &R,
    event: &RequestEvent,
) -> HandlerResult<HandlerResponse> {
    let body: IntakeFormBody = event.json_body()?;

    let form = IntakeForm {
        form_id: Uuid::new_v4().to_string(),
        full_name: body.full_name,
        date_of_birth: body.date_of_birth,
        gender: body.gender,
        contact_number: body.contact_number,
        home_address: body.home_address,
        conditions: body.conditions,
        other_condition: body.other_condition,
        allergies: body.allergies,
        medications: body.medications,
        surgeries: body.surgeries,
        emergency_contact_name: body.emergency_contact_name,
        emergency_contact_number: body.emergency_contact_number,
        relationship: body.relationship,
        submitted_at: Utc::now().to_rfc3339(),
    };

    repo.put(&form).await?;
    tracing::info!(form_id = %form.form_id, "intake form stored");

    Ok(HandlerResponse::ok(&json!({
        "message": "Intake form submitted successfully.",
        "formId": form.form_id,
    })))
}
