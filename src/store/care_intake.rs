//! Care-intake questionnaire storage
//!
//! The long-form questionnaire lands in the relational store as a single
//! row per submission. Rows are written once and never read back here.

use std::future::Future;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::DatabaseConfig;

use super::errors::{StoreError, StoreResult};
use super::mysql;

/// One row for the `care_intake` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareIntakeRecord {
    #[serde(default)]
    pub client_username: String,
    pub care_navigator_username: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub home_address: Option<String>,
    pub current_medical_conditions_diabetes: Option<bool>,
    pub current_medical_conditions_hypertension: Option<bool>,
    pub current_medical_conditions_arthritis: Option<bool>,
    pub current_medical_conditions_heart_disease: Option<bool>,
    pub current_medical_conditions_other: Option<String>,
    pub known_allergies: Option<String>,
    pub current_medications: Option<String>,
    pub history_of_surgeries_procedures: Option<String>,
    pub primary_reason_for_care: Option<String>,
    pub current_medical_conditions_weekdays: Option<bool>,
    pub current_medical_conditions_weekends: Option<bool>,
    pub current_medical_conditions_morning: Option<bool>,
    pub current_medical_conditions_evening: Option<bool>,
    pub special_assistance_mobility: Option<bool>,
    pub special_assistance_hypertension: Option<bool>,
    pub special_assistance_medication_management: Option<bool>,
    pub special_assistance_hygiene: Option<bool>,
    pub additional_notes: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_number: Option<String>,
    pub relationship_to_emergency_contact: Option<String>,
}

/// Write-once access to care-intake rows.
pub trait CareIntakeRepository: Send + Sync {
    fn insert(&self, record: &CareIntakeRecord) -> impl Future<Output = StoreResult<()>> + Send;
}

// ==================
// MySQL repository
// ==================

/// MySQL-backed care-intake repository; opens one fresh connection per call.
#[derive(Debug, Clone)]
pub struct MySqlCareIntakeRepository {
    config: DatabaseConfig,
}

impl MySqlCareIntakeRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

impl CareIntakeRepository for MySqlCareIntakeRepository {
    async fn insert(&self, record: &CareIntakeRecord) -> StoreResult<()> {
        let mut conn = mysql::connect(&self.config).await?;
        let result = sqlx::query(
            "INSERT INTO care_intake (\
               client_username, care_navigator_username, full_name, date_of_birth, gender, \
               contact_number, home_address, current_medical_conditions_diabetes, \
               current_medical_conditions_hypertension, current_medical_conditions_arthritis, \
               current_medical_conditions_heart_disease, current_medical_conditions_other, \
               known_allergies, current_medications, history_of_surgeries_procedures, \
               primary_reason_for_care, current_medical_conditions_weekdays, \
               current_medical_conditions_weekends, current_medical_conditions_morning, \
               current_medical_conditions_evening, special_assistance_mobility, \
               special_assistance_hypertension, special_assistance_medication_management, \
               special_assistance_hygiene, additional_notes, emergency_contact_name, \
               emergency_contact_number, relationship_to_emergency_contact\
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.client_username)
        .bind(&record.care_navigator_username)
        .bind(&record.full_name)
        .bind(&record.date_of_birth)
        .bind(&record.gender)
        .bind(&record.contact_number)
        .bind(&record.home_address)
        .bind(record.current_medical_conditions_diabetes)
        .bind(record.current_medical_conditions_hypertension)
        .bind(record.current_medical_conditions_arthritis)
        .bind(record.current_medical_conditions_heart_disease)
        .bind(&record.current_medical_conditions_other)
        .bind(&record.known_allergies)
        .bind(&record.current_medications)
        .bind(&record.history_of_surgeries_procedures)
        .bind(&record.primary_reason_for_care)
        .bind(record.current_medical_conditions_weekdays)
        .bind(record.current_medical_conditions_weekends)
        .bind(record.current_medical_conditions_morning)
        .bind(record.current_medical_conditions_evening)
        .bind(record.special_assistance_mobility)
        .bind(record.special_assistance_hypertension)
        .bind(record.special_assistance_medication_management)
        .bind(record.special_assistance_hygiene)
        .bind(&record.additional_notes)
        .bind(&record.emergency_contact_name)
        .bind(&record.emergency_contact_number)
        .bind(&record.relationship_to_emergency_contact)
        .execute(&mut conn)
        .await;
        mysql::release(conn).await;

        result.map_err(StoreError::query)?;
        Ok(())
    }
}

// ==================
// In-memory fake
// ==================

#[derive(Debug, Default)]
struct InMemoryCareIntake {
    rows: Vec<CareIntakeRecord>,
    poison: Option<String>,
}

/// In-memory fake for care-intake rows.
#[derive(Debug, Default)]
pub struct InMemoryCareIntakeRepository {
    state: Mutex<InMemoryCareIntake>,
}

impl InMemoryCareIntakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state
            .lock()
            .expect("care intake store lock poisoned")
            .poison = Some(message.into());
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .expect("care intake store lock poisoned")
            .rows
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone of the stored rows, for assertions.
    pub fn rows(&self) -> Vec<CareIntakeRecord> {
        self.state
            .lock()
            .expect("care intake store lock poisoned")
            .rows
            .clone()
    }
}

impl CareIntakeRepository for InMemoryCareIntakeRepository {
    async fn insert(&self, record: &CareIntakeRecord) -> StoreResult<()> {
        let mut state = self.state.lock().expect("care intake store lock poisoned");
        if let Some(message) = &state.poison {
            return Err(StoreError::Query(message.clone()));
        }
        state.rows.push(record.clone());
        Ok(())
    }
}
