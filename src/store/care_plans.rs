//! Care plan storage
//!
//! Care plans are created and maintained elsewhere; this system only reads
//! them, through two projections: the client view and the navigator view.

use std::future::Future;
use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;

use super::errors::{StoreError, StoreResult};
use super::mysql;

/// Client-facing projection of a care plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientCarePlan {
    pub id: u64,
    pub care_plan_name: Option<String>,
    pub care_navigator_username: Option<String>,
    pub status: Option<String>,
    pub date_created: Option<NaiveDateTime>,
}

/// Navigator-facing projection of a care plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NavigatorCarePlan {
    pub id: u64,
    pub client_username: String,
    pub care_navigator_id: u64,
    pub status: Option<String>,
    pub description: Option<String>,
    pub date_created: Option<NaiveDateTime>,
}

/// A full care-plan row, held by the in-memory store
#[derive(Debug, Clone, Default)]
pub struct CarePlanRow {
    pub id: u64,
    pub client_username: String,
    pub care_navigator_id: u64,
    pub care_navigator_username: Option<String>,
    pub care_plan_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub date_created: Option<NaiveDateTime>,
}

/// Read access to care plans.
pub trait CarePlanRepository: Send + Sync {
    /// Care plans owned by one client, newest first.
    fn list_for_client(
        &self,
        client_username: &str,
    ) -> impl Future<Output = StoreResult<Vec<ClientCarePlan>>> + Send;

    /// Care plans assigned to one care navigator.
    fn list_for_navigator(
        &self,
        care_navigator_id: u64,
    ) -> impl Future<Output = StoreResult<Vec<NavigatorCarePlan>>> + Send;
}

// ==================
// MySQL repository
// ==================

/// MySQL-backed care plan repository; opens one fresh connection per call.
#[derive(Debug, Clone)]
pub struct MySqlCarePlanRepository {
    config: DatabaseConfig,
}

impl MySqlCarePlanRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

impl CarePlanRepository for MySqlCarePlanRepository {
    async fn list_for_client(&self, client_username: &str) -> StoreResult<Vec<ClientCarePlan>> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query_as::<_, ClientCarePlan>(
            "SELECT id, care_plan_name, care_navigator_username, status, date_created \
             FROM care_plans \
             WHERE client_username = ? \
             ORDER BY date_created DESC",
        )
        .bind(client_username)
        .fetch_all(&mut conn)
        .await;
        mysql::release(conn).await;

        result.map_err(StoreError::query)
    }

    async fn list_for_navigator(
        &self,
        care_navigator_id: u64,
    ) -> StoreResult<Vec<NavigatorCarePlan>> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query_as::<_, NavigatorCarePlan>(
            "SELECT id, client_username, care_navigator_id, status, description, date_created \
             FROM care_plans \
             WHERE care_navigator_id = ?",
        )
        .bind(care_navigator_id)
        .fetch_all(&mut conn)
        .await;
        mysql::release(conn).await;

        result.map_err(StoreError::query)
    }
}

// ==================
// In-memory fake
// ==================

#[derive(Debug, Default)]
struct InMemoryCarePlans {
    rows: Vec<CarePlanRow>,
    poison: Option<String>,
}

/// In-memory fake serving both projections from seeded rows.
#[derive(Debug, Default)]
pub struct InMemoryCarePlanRepository {
    state: Mutex<InMemoryCarePlans>,
}

impl InMemoryCarePlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, row: CarePlanRow) {
        self.state
            .lock()
            .expect("care plan store lock poisoned")
            .rows
            .push(row);
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state
            .lock()
            .expect("care plan store lock poisoned")
            .poison = Some(message.into());
    }
}

impl CarePlanRepository for InMemoryCarePlanRepository {
    async fn list_for_client(&self, client_username: &str) -> StoreResult<Vec<ClientCarePlan>> {
        let state = self.state.lock().expect("care plan store lock poisoned");
        if let Some(message) = &state.poison {
            return Err(StoreError::Query(message.clone()));
        }

        let mut plans: Vec<_> = state
            .rows
            .iter()
            .filter(|r| r.client_username == client_username)
            .collect();
        plans.sort_by(|a, b| b.date_created.cmp(&a.date_created));

        Ok(plans
            .into_iter()
            .map(|r| ClientCarePlan {
                id: r.id,
                care_plan_name: r.care_plan_name.clone(),
                care_navigator_username: r.care_navigator_username.clone(),
                status: r.status.clone(),
                date_created: r.date_created,
            })
            .collect())
    }

    async fn list_for_navigator(
        &self,
        care_navigator_id: u64,
    ) -> StoreResult<Vec<NavigatorCarePlan>> {
        let state = self.state.lock().expect("care plan store lock poisoned");
        if let Some(message) = &state.poison {
            return Err(StoreError::Query(message.clone()));
        }

        Ok(state
            .rows
            .iter()
            .filter(|r| r.care_navigator_id == care_navigator_id)
            .map(|r| NavigatorCarePlan {
                id: r.id,
                client_username: r.client_username.clone(),
                care_navigator_id: r.care_navigator_id,
                status: r.status.clone(),
                description: r.description.clone(),
                date_created: r.date_created,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: u64, client: &str, navigator: u64, day: u32) -> CarePlanRow {
        CarePlanRow {
            id,
            client_username: client.to_string(),
            care_navigator_id: navigator,
            date_created: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_client_listing_is_newest_first() {
        let repo = InMemoryCarePlanRepository::new();
        repo.seed(row(1, "amrita", 10, 1));
        repo.seed(row(2, "amrita", 10, 15));
        repo.seed(row(3, "someone-else", 10, 20));

        let plans = repo.list_for_client("amrita").await.unwrap();
        assert_eq!(plans.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_unknown_client_yields_empty() {
        let repo = InMemoryCarePlanRepository::new();
        repo.seed(row(1, "amrita", 10, 1));
        assert!(repo.list_for_client("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_navigator_listing_filters_by_id() {
        let repo = InMemoryCarePlanRepository::new();
        repo.seed(row(1, "amrita", 10, 1));
        repo.seed(row(2, "ben", 11, 2));

        let plans = repo.list_for_navigator(11).await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].client_username, "ben");
    }
}
