//! Forwards completed orders to the analytics e-commerce plugin.
//!
//! A transaction is sent as one `addTransaction` hit, one `addItem` hit per
//! line item, and a closing `send`. Every value is stringified on the way out
//! and every line item carries the parent transaction id.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use hora_core_types::Hit;
use hora_transport::AnalyticsTransport;

/// Order-level details such as `revenue`, `shipping` and `tax`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    /// Optional extras: `category`, `price`, `quantity`, ...
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TransactionItem {
    pub fn new(name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            fields: Map::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Where a required field was missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldScope {
    Transaction,
    Item(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingField {
    pub scope: FieldScope,
    pub field: &'static str,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            FieldScope::Transaction => write!(f, "transaction.{}", self.field),
            FieldScope::Item(index) => write!(f, "items[{index}].{}", self.field),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommerceError {
    #[error("transaction payload is missing required fields: {}", join(.missing))]
    Validation { missing: Vec<MissingField> },
}

fn join(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks every required field and reports all of the empty ones at once.
pub fn validate(
    id: &str,
    affiliation: &str,
    items: &[TransactionItem],
) -> Result<(), CommerceError> {
    let mut missing = Vec::new();
    let mut require = |scope: FieldScope, field: &'static str, value: &str| {
        if value.is_empty() {
            missing.push(MissingField { scope, field });
        }
    };

    require(FieldScope::Transaction, "id", id);
    require(FieldScope::Transaction, "affiliation", affiliation);
    for (index, item) in items.iter().enumerate() {
        require(FieldScope::Item(index), "name", &item.name);
        require(FieldScope::Item(index), "sku", &item.sku);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CommerceError::Validation { missing })
    }
}

fn stringify(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

fn stringify_all(fields: &Map<String, Value>, into: &mut Map<String, Value>) {
    for (key, value) in fields {
        into.insert(key.clone(), stringify(value));
    }
}

pub struct TransactionSender {
    plugin: String,
    transport: Arc<dyn AnalyticsTransport>,
}

impl TransactionSender {
    pub fn new(tracker_name: &str, transport: Arc<dyn AnalyticsTransport>) -> Self {
        Self {
            plugin: format!("{tracker_name}.ecommerce"),
            transport,
        }
    }

    pub fn send(
        &self,
        id: &str,
        affiliation: &str,
        transaction: &Transaction,
        items: &[TransactionItem],
    ) -> Result<(), CommerceError> {
        validate(id, affiliation, items).map_err(|err| {
            warn!(%err, "transaction rejected");
            err
        })?;

        let mut payload = Map::new();
        stringify_all(&transaction.fields, &mut payload);
        payload.insert("id".into(), Value::from(id));
        payload.insert("affiliation".into(), Value::from(affiliation));
        self.transport
            .dispatch(Hit::new(self.command("addTransaction")).arg(payload));

        for item in items {
            let mut payload = Map::new();
            stringify_all(&item.fields, &mut payload);
            payload.insert("id".into(), Value::from(id));
            payload.insert("name".into(), Value::from(item.name.as_str()));
            payload.insert("sku".into(), Value::from(item.sku.as_str()));
            self.transport
                .dispatch(Hit::new(self.command("addItem")).arg(payload));
        }

        self.transport.dispatch(Hit::new(self.command("send")));
        debug!(id, items = items.len(), "transaction forwarded");
        Ok(())
    }

    fn command(&self, op: &str) -> String {
        format!("{}:{}", self.plugin, op)
    }
}
