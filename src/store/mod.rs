//! Data-store access
//!
//! Entity models and repository traits, with one backend implementation and
//! one in-memory fake per entity. Repository methods open a fresh connection
//! per call and release it on every exit path; each method runs exactly one
//! statement.

mod care_intake;
mod care_plans;
mod errors;
mod intake;
mod mysql;
mod tasks;

pub use care_intake::{
    CareIntakeRecord, CareIntakeRepository, InMemoryCareIntakeRepository,
    MySqlCareIntakeRepository,
};
pub use care_plans::{
    CarePlanRepository, CarePlanRow, ClientCarePlan, InMemoryCarePlanRepository,
    MySqlCarePlanRepository, NavigatorCarePlan,
};
pub use errors::{StoreError, StoreResult};
pub use intake::{
    DynamoDbIntakeRepository, InMemoryIntakeRepository, IntakeForm, IntakeRepository,
};
pub use tasks::{
    InMemoryTaskRepository, MySqlTaskRepository, NewTask, Task, TaskRepository, TaskUpdate,
};
