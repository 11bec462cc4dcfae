//! Request handlers
//!
//! One pure async function per endpoint: (repository, request event) →
//! response. Validation runs before any data-store access, store failures
//! map to 500 with the underlying message preserved, and every response
//! carries the cross-origin header.

mod care_intake;
mod care_plans;
mod errors;
mod intake;
mod tasks;

pub use care_intake::submit_care_intake;
pub use care_plans::{list_care_plans_for_client, list_care_plans_for_navigator};
pub use errors::{HandlerError, HandlerResult};
pub use intake::submit_intake_form;
pub use tasks::{complete_task, create_task, delete_task, list_tasks, update_task};

/// Required body field; `None` fails fast before any store access.
fn require<T>(value: Option<T>, name: &'static str) -> HandlerResult<T> {
    value.ok_or(HandlerError::MissingField(name))
}

/// Numeric identifier carried as a string parameter.
fn parse_id(name: &'static str, raw: &str) -> HandlerResult<u64> {
    raw.parse().map_err(|_| HandlerError::InvalidField {
        name,
        value: raw.to_string(),
    })
}
