use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use entry_path::Namespace;
use entry_value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{decode, FieldError, InvalidFixedValueSnafu, WrongNamespaceSnafu};
use crate::entry::{Entry, Severity};

/// One of the single-value slots of an entry.
///
/// Fixed fields have no keys. Writes are checked against the slot's type, and
/// writing `null` clears an optional slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FixedField {
    Timestamp,
    ObservedTimestamp,
    Severity,
    SeverityText,
    TraceId,
    SpanId,
    TraceFlags,
    ScopeName,
}

impl FixedField {
    pub const fn namespace(self) -> Namespace {
        match self {
            FixedField::Timestamp => Namespace::Timestamp,
            FixedField::ObservedTimestamp => Namespace::ObservedTimestamp,
            FixedField::Severity => Namespace::Severity,
            FixedField::SeverityText => Namespace::SeverityText,
            FixedField::TraceId => Namespace::TraceId,
            FixedField::SpanId => Namespace::SpanId,
            FixedField::TraceFlags => Namespace::TraceFlags,
            FixedField::ScopeName => Namespace::ScopeName,
        }
    }

    pub const fn from_namespace(namespace: Namespace) -> Option<Self> {
        match namespace {
            Namespace::Timestamp => Some(FixedField::Timestamp),
            Namespace::ObservedTimestamp => Some(FixedField::ObservedTimestamp),
            Namespace::Severity => Some(FixedField::Severity),
            Namespace::SeverityText => Some(FixedField::SeverityText),
            Namespace::TraceId => Some(FixedField::TraceId),
            Namespace::SpanId => Some(FixedField::SpanId),
            Namespace::TraceFlags => Some(FixedField::TraceFlags),
            Namespace::ScopeName => Some(FixedField::ScopeName),
            Namespace::Resource | Namespace::Attributes | Namespace::Body => None,
        }
    }

    /// Reads the slot, or `None` while it is unset. Severity counts as unset
    /// at [`Severity::DEFAULT`].
    pub fn get<'a>(self, entry: &'a Entry) -> Option<Cow<'a, Value>> {
        let value = match self {
            FixedField::Timestamp => entry.timestamp.map(Value::Timestamp),
            FixedField::ObservedTimestamp => entry.observed_timestamp.map(Value::Timestamp),
            FixedField::Severity => (entry.severity != Severity::DEFAULT)
                .then(|| Value::from(entry.severity.number())),
            FixedField::SeverityText => entry.severity_text.as_deref().map(Value::from),
            FixedField::TraceId => entry.trace_id.clone().map(Value::Bytes),
            FixedField::SpanId => entry.span_id.clone().map(Value::Bytes),
            FixedField::TraceFlags => entry.trace_flags.clone().map(Value::Bytes),
            FixedField::ScopeName => entry.scope_name.as_deref().map(Value::from),
        };
        value.map(Cow::Owned)
    }

    pub fn set(self, entry: &mut Entry, value: Value) -> Result<(), FieldError> {
        match self {
            FixedField::Timestamp => entry.timestamp = self.timestamp(value)?,
            FixedField::ObservedTimestamp => entry.observed_timestamp = self.timestamp(value)?,
            FixedField::Severity => entry.severity = self.severity(value)?,
            FixedField::SeverityText => entry.severity_text = self.text(value)?,
            FixedField::TraceId => entry.trace_id = self.bytes(value)?,
            FixedField::SpanId => entry.span_id = self.bytes(value)?,
            FixedField::TraceFlags => entry.trace_flags = self.bytes(value)?,
            FixedField::ScopeName => entry.scope_name = self.text(value)?,
        }
        Ok(())
    }

    /// Clears the slot and returns its previous value. Severity resets to
    /// [`Severity::DEFAULT`].
    pub fn delete(self, entry: &mut Entry) -> Option<Value> {
        match self {
            FixedField::Timestamp => entry.timestamp.take().map(Value::Timestamp),
            FixedField::ObservedTimestamp => entry.observed_timestamp.take().map(Value::Timestamp),
            FixedField::Severity => {
                let previous = std::mem::take(&mut entry.severity);
                (previous != Severity::DEFAULT).then(|| Value::from(previous.number()))
            }
            FixedField::SeverityText => entry.severity_text.take().map(Value::from),
            FixedField::TraceId => entry.trace_id.take().map(Value::Bytes),
            FixedField::SpanId => entry.span_id.take().map(Value::Bytes),
            FixedField::TraceFlags => entry.trace_flags.take().map(Value::Bytes),
            FixedField::ScopeName => entry.scope_name.take().map(Value::from),
        }
    }

    fn timestamp(self, value: Value) -> Result<Option<chrono::DateTime<chrono::Utc>>, FieldError> {
        let timestamp = match &value {
            Value::Timestamp(timestamp) => Some(*timestamp),
            Value::Bytes(_) => value.as_str().and_then(|text| {
                chrono::DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|timestamp| timestamp.with_timezone(&chrono::Utc))
            }),
            Value::Null => return Ok(None),
            _ => None,
        };
        match timestamp {
            Some(timestamp) => Ok(Some(timestamp)),
            None => self.invalid("a timestamp", &value),
        }
    }

    fn severity(self, value: Value) -> Result<Severity, FieldError> {
        let severity = match &value {
            Value::Integer(number) => Severity::from_number(*number),
            Value::Bytes(_) => value.as_str().and_then(|name| name.parse().ok()),
            Value::Null => Some(Severity::DEFAULT),
            _ => None,
        };
        match severity {
            Some(severity) => Ok(severity),
            None => self.invalid("a severity number 0..=24 or level name", &value),
        }
    }

    fn text(self, value: Value) -> Result<Option<String>, FieldError> {
        match value {
            Value::Bytes(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => Ok(Some(text)),
                Err(_) => InvalidFixedValueSnafu {
                    field: self,
                    expected: "a UTF-8 string",
                    found: "non UTF-8 bytes",
                }
                .fail(),
            },
            Value::Null => Ok(None),
            other => self.invalid("a string", &other),
        }
    }

    fn bytes(self, value: Value) -> Result<Option<Bytes>, FieldError> {
        match value {
            Value::Bytes(bytes) => Ok(Some(bytes)),
            Value::Null => Ok(None),
            other => self.invalid("bytes", &other),
        }
    }

    fn invalid<T>(self, expected: &'static str, found: &Value) -> Result<T, FieldError> {
        InvalidFixedValueSnafu {
            field: self,
            expected,
            found: found.kind_str(),
        }
        .fail()
    }
}

impl fmt::Display for FixedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace().as_str())
    }
}

impl FromStr for FixedField {
    type Err = FieldError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let (namespace, _) = decode(path)?;
        FixedField::from_namespace(namespace).ok_or_else(|| {
            WrongNamespaceSnafu {
                path,
                expected: "a single-value field",
            }
            .build()
        })
    }
}

impl Serialize for FixedField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FixedField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde::deserialize_text(deserializer)
    }
}
