//! The record flowing through a pipeline and the fields that address it.

pub mod field;
mod severity;

use std::borrow::Cow;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use entry_value::{ObjectMap, Value};
use serde::{Deserialize, Serialize};

pub use field::{AttributeField, BodyField, Field, FieldError, FixedField, ResourceField};
pub use severity::Severity;

/// A single telemetry record.
///
/// `resource` and `attributes` stay `None` until something is written to
/// them. An entry is exclusively owned by whichever pipeline stage is
/// currently processing it; fields mutate it through `&mut Entry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ObjectMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ObjectMap>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_flags: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_name: Option<String>,
}

impl Entry {
    /// Creates an empty entry observed now.
    pub fn new() -> Self {
        Self {
            observed_timestamp: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Creates an entry observed now with the given body.
    pub fn with_body(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new()
        }
    }

    pub fn get(&self, field: &Field) -> Option<Cow<'_, Value>> {
        field.get(self)
    }

    pub fn set(&mut self, field: &Field, value: impl Into<Value>) -> Result<(), FieldError> {
        field.set(self, value)
    }

    pub fn merge(&mut self, field: &Field, values: ObjectMap) -> Result<(), FieldError> {
        field.merge(self, values)
    }

    pub fn delete(&mut self, field: &Field) -> Option<Value> {
        field.delete(self)
    }
}
