//! Task storage
//!
//! Task model, repository trait, the MySQL-backed repository, and an
//! in-memory fake for handler tests.

use std::future::Future;
use std::sync::Mutex;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;

use super::errors::{StoreError, StoreResult};
use super::mysql;

/// A row in the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: u64,
    pub care_plan_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub updated_by: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Fields for inserting a task; the store sets `updated_at`
#[derive(Debug, Clone)]
pub struct NewTask {
    pub care_plan_id: u64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub updated_by: Option<String>,
}

/// Full-field update by id; the store sets `updated_at`
#[derive(Debug, Clone)]
pub struct TaskUpdate {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Abstracts task persistence so handlers can run against fakes.
///
/// Write methods return the affected-row count; zero means the id did not
/// match any row.
pub trait TaskRepository: Send + Sync {
    /// Insert one task; returns the server-assigned id.
    fn insert(&self, task: &NewTask) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Update every mutable column of one task by id.
    fn update(&self, update: &TaskUpdate) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Overwrite only the status column of one task by id.
    fn set_status(
        &self,
        id: u64,
        status: &str,
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Remove one task by id.
    fn delete(&self, id: u64) -> impl Future<Output = StoreResult<u64>> + Send;

    /// All tasks, or the tasks of one care plan.
    fn list(
        &self,
        care_plan_id: Option<u64>,
    ) -> impl Future<Output = StoreResult<Vec<Task>>> + Send;
}

// ==================
// MySQL repository
// ==================

/// MySQL-backed task repository; opens one fresh connection per call.
#[derive(Debug, Clone)]
pub struct MySqlTaskRepository {
    config: DatabaseConfig,
}

impl MySqlTaskRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

impl TaskRepository for MySqlTaskRepository {
    async fn insert(&self, task: &NewTask) -> StoreResult<u64> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query(
            "INSERT INTO tasks (care_plan_id, title, description, status, updated_by, updated_at) \
             VALUES (?, ?, ?, ?, ?, NOW())",
        )
        .bind(task.care_plan_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.updated_by)
        .execute(&mut conn)
        .await;
        mysql::release(conn).await;

        Ok(result.map_err(StoreError::query)?.last_insert_id())
    }

    async fn update(&self, update: &TaskUpdate) -> StoreResult<u64> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query(
            "UPDATE tasks \
             SET title = ?, description = ?, status = ?, updated_at = NOW(), `start` = ?, `end` = ? \
             WHERE id = ?",
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.status)
        .bind(update.start)
        .bind(update.end)
        .bind(update.id)
        .execute(&mut conn)
        .await;
        mysql::release(conn).await;

        Ok(result.map_err(StoreError::query)?.rows_affected())
    }

    async fn set_status(&self, id: u64, status: &str) -> StoreResult<u64> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query("UPDATE tasks SET status = ?, updated_at = NOW() WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut conn)
            .await;
        mysql::release(conn).await;

        Ok(result.map_err(StoreError::query)?.rows_affected())
    }

    async fn delete(&self, id: u64) -> StoreResult<u64> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await;
        mysql::release(conn).await;

        Ok(result.map_err(StoreError::query)?.rows_affected())
    }

    async fn list(&self, care_plan_id: Option<u64>) -> StoreResult<Vec<Task>> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = match care_plan_id {
            Some(cp) => {
                sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE care_plan_id = ?")
                    .bind(cp)
                    .fetch_all(&mut conn)
                    .await
            }
            None => {
                sqlx::query_as::<_, Task>("SELECT * FROM tasks")
                    .fetch_all(&mut conn)
                    .await
            }
        };
        mysql::release(conn).await;

        result.map_err(StoreError::query)
    }
}

// ==================
// In-memory fake
// ==================

#[derive(Debug, Default)]
struct InMemoryTasks {
    next_id: u64,
    rows: Vec<Task>,
    poison: Option<String>,
}

/// In-memory fake with the same observable behavior as the MySQL store.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    state: Mutex<InMemoryTasks>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as-is, keeping `next_id` ahead of it.
    pub fn seed(&self, task: Task) {
        let mut state = self.state.lock().expect("task store lock poisoned");
        state.next_id = state.next_id.max(task.id);
        state.rows.push(task);
    }

    /// Make every subsequent operation fail with the given message, to
    /// exercise the infrastructure-error path.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().expect("task store lock poisoned").poison = Some(message.into());
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.state.lock().expect("task store lock poisoned").rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_poison(state: &InMemoryTasks) -> StoreResult<()> {
        match &state.poison {
            Some(message) => Err(StoreError::Query(message.clone())),
            None => Ok(()),
        }
    }
}

impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> StoreResult<u64> {
        let mut state = self.state.lock().expect("task store lock poisoned");
        Self::check_poison(&state)?;

        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(Task {
            id,
            care_plan_id: task.care_plan_id,
            title: task.title.clone(),
            description: Some(task.description.clone()),
            status: task.status.clone(),
            start: None,
            end: None,
            updated_by: task.updated_by.clone(),
            updated_at: Some(Utc::now().naive_utc()),
        });
        Ok(id)
    }

    async fn update(&self, update: &TaskUpdate) -> StoreResult<u64> {
        let mut state = self.state.lock().expect("task store lock poisoned");
        Self::check_poison(&state)?;

        match state.rows.iter_mut().find(|t| t.id == update.id) {
            Some(row) => {
                row.title = update.title.clone();
                row.description = update.description.clone();
                row.status = update.status.clone();
                row.start = Some(update.start);
                row.end = Some(update.end);
                row.updated_at = Some(Utc::now().naive_utc());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_status(&self, id: u64, status: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().expect("task store lock poisoned");
        Self::check_poison(&state)?;

        match state.rows.iter_mut().find(|t| t.id == id) {
            Some(row) => {
                row.status = status.to_string();
                row.updated_at = Some(Utc::now().naive_utc());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: u64) -> StoreResult<u64> {
        let mut state = self.state.lock().expect("task store lock poisoned");
        Self::check_poison(&state)?;

        let before = state.rows.len();
        state.rows.retain(|t| t.id != id);
        Ok((before - state.rows.len()) as u64)
    }

    async fn list(&self, care_plan_id: Option<u64>) -> StoreResult<Vec<Task>> {
        let state = self.state.lock().expect("task store lock poisoned");
        Self::check_poison(&state)?;

        Ok(state
            .rows
            .iter()
            .filter(|t| care_plan_id.map_or(true, |cp| t.care_plan_id == cp))
            .cloned()
            .collect())
    }
}
