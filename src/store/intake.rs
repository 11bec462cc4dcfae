//! Intake form storage
//!
//! Submitted intake forms are documents keyed by a server-generated
//! `form_id`. They are written once and never mutated or deleted; the read
//! path exists for verification only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde::{Deserialize, Serialize};

use crate::config::IntakeStoreConfig;

use super::errors::{StoreError, StoreResult};

/// A submitted intake form as stored in the document store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub form_id: String,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub home_address: Option<String>,
    pub conditions: Vec<String>,
    pub other_condition: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub surgeries: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_number: Option<String>,
    pub relationship: Option<String>,
    /// RFC 3339, server-set at submission time
    pub submitted_at: String,
}

/// Write-once access to intake form submissions.
pub trait IntakeRepository: Send + Sync {
    /// Store one submission under its `form_id`.
    fn put(&self, form: &IntakeForm) -> impl Future<Output = StoreResult<()>> + Send;

    /// Fetch one submission back by `form_id`.
    fn get(&self, form_id: &str) -> impl Future<Output = StoreResult<Option<IntakeForm>>> + Send;
}

// ==================
// DynamoDB repository
// ==================

/// DynamoDB-backed intake repository
#[derive(Debug, Clone)]
pub struct DynamoDbIntakeRepository {
    client: Client,
    table: String,
}

impl DynamoDbIntakeRepository {
    /// Build a client from the ambient AWS environment (credentials, region).
    pub async fn from_env(config: &IntakeStoreConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: Client::new(&aws_config),
            table: config.table.clone(),
        }
    }

    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

impl IntakeRepository for DynamoDbIntakeRepository {
    async fn put(&self, form: &IntakeForm) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(marshal(form)))
            .send()
            .await
            .map_err(StoreError::document)?;
        Ok(())
    }

    async fn get(&self, form_id: &str) -> StoreResult<Option<IntakeForm>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("form_id", AttributeValue::S(form_id.to_string()))
            .send()
            .await
            .map_err(StoreError::document)?;

        Ok(output.item().map(unmarshal))
    }
}

fn marshal(form: &IntakeForm) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("form_id".to_string(), AttributeValue::S(form.form_id.clone()));
    item.insert(
        "submitted_at".to_string(),
        AttributeValue::S(form.submitted_at.clone()),
    );
    if !form.conditions.is_empty() {
        item.insert(
            "conditions".to_string(),
            AttributeValue::Ss(form.conditions.clone()),
        );
    }

    put_optional(&mut item, "full_name", &form.full_name);
    put_optional(&mut item, "date_of_birth", &form.date_of_birth);
    put_optional(&mut item, "gender", &form.gender);
    put_optional(&mut item, "contact_number", &form.contact_number);
    put_optional(&mut item, "home_address", &form.home_address);
    put_optional(&mut item, "other_condition", &form.other_condition);
    put_optional(&mut item, "allergies", &form.allergies);
    put_optional(&mut item, "medications", &form.medications);
    put_optional(&mut item, "surgeries", &form.surgeries);
    put_optional(&mut item, "emergency_contact_name", &form.emergency_contact_name);
    put_optional(
        &mut item,
        "emergency_contact_number",
        &form.emergency_contact_number,
    );
    put_optional(&mut item, "relationship", &form.relationship);

    item
}

fn put_optional(
    item: &mut HashMap<String, AttributeValue>,
    name: &str,
    value: &Option<String>,
) {
    if let Some(value) = value {
        item.insert(name.to_string(), AttributeValue::S(value.clone()));
    }
}

fn unmarshal(item: &HashMap<String, AttributeValue>) -> IntakeForm {
    let string = |name: &str| {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
    };

    IntakeForm {
        form_id: string("form_id").unwrap_or_default(),
        full_name: string("full_name"),
        date_of_birth: string("date_of_birth"),
        gender: string("gender"),
        contact_number: string("contact_number"),
        home_address: string("home_address"),
        conditions: item
            .get("conditions")
            .and_then(|v| v.as_ss().ok())
            .cloned()
            .unwrap_or_default(),
        other_condition: string("other_condition"),
        allergies: string("allergies"),
        medications: string("medications"),
        surgeries: string("surgeries"),
        emergency_contact_name: string("emergency_contact_name"),
        emergency_contact_number: string("emergency_contact_number"),
        relationship: string("relationship"),
        submitted_at: string("submitted_at").unwrap_or_default(),
    }
}

// ==================
// In-memory fake
// ==================

#[derive(Debug, Default)]
struct InMemoryIntake {
    items: HashMap<String, IntakeForm>,
    poison: Option<String>,
}

/// In-memory fake for intake submissions.
#[derive(Debug, Default)]
pub struct InMemoryIntakeRepository {
    state: Mutex<InMemoryIntake>,
}

impl InMemoryIntakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state.lock().expect("intake store lock poisoned").poison = Some(message.into());
    }

    /// Number of stored submissions.
    pub fn len(&self) -> usize {
        self.state.lock().expect("intake store lock poisoned").items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntakeRepository for InMemoryIntakeRepository {
    async fn put(&self, form: &IntakeForm) -> StoreResult<()> {
        let mut state = self.state.lock().expect("intake store lock poisoned");
        if let Some(message) = &state.poison {
            return Err(StoreError::Document(message.clone()));
        }
        state.items.insert(form.form_id.clone(), form.clone());
        Ok(())
    }

    async fn get(&self, form_id: &str) -> StoreResult<Option<IntakeForm>> {
        let state = self.state.lock().expect("intake store lock poisoned");
        if let Some(message) = &state.poison {
            return Err(StoreError::Document(message.clone()));
        }
        Ok(state.items.get(form_id).cloned())
    }
}
