use serde::{Deserialize, Serialize};

use super::{OnError, Operator, TransformError};
use crate::entry::{Entry, Field};
use crate::internal_events::FieldMissing;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RemoveConfig {
    pub field: Field,
    #[serde(default)]
    pub on_error: OnError,
}

impl RemoveConfig {
    pub fn build(&self) -> crate::Result<RemoveOperator> {
        Ok(RemoveOperator::new(self.field.clone()))
    }
}

/// Deletes a field. Removing a namespace root clears the whole namespace.
#[derive(Debug, Clone)]
pub struct RemoveOperator {
    field: Field,
}

impl RemoveOperator {
    pub fn new(field: Field) -> Self {
        Self { field }
    }
}

impl Operator for RemoveOperator {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn process(&self, entry: &mut Entry) -> Result<(), TransformError> {
        if self.field.delete(entry).is_none() {
            emit!(FieldMissing {
                operator: self.name(),
                field: &self.field,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use entry_value::Value;
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    fn remove(path: &str) -> RemoveOperator {
        RemoveOperator::new(path.parse().unwrap())
    }

    fn entry() -> Entry {
        serde_json::from_value(json!({
            "resource": { "host": "a", "k8s": { "pod": "p", "ns": "n" } },
            "body": { "message": "hi", "level": "info" },
            "severity_text": "INFO",
        }))
        .unwrap()
    }

    #[test]
    fn removes_nested_key() {
        let mut entry = entry();
        remove("resource.k8s.pod").process(&mut entry).unwrap();
        assert_eq!(
            entry.resource,
            Value::from(json!({ "host": "a", "k8s": { "ns": "n" } })).into_object()
        );
    }

    #[test]
    fn missing_field_is_noop() {
        let mut entry = entry();
        let before = entry.clone();
        remove("resource.host.name").process(&mut entry).unwrap();
        remove("attributes.a").process(&mut entry).unwrap();
        remove("trace_id").process(&mut entry).unwrap();
        assert_eq!(entry, before);
    }

    #[test]
    fn removes_roots_and_fixed_fields() {
        let mut entry = entry();
        remove("resource").process(&mut entry).unwrap();
        remove("body").process(&mut entry).unwrap();
        remove("severity_text").process(&mut entry).unwrap();
        assert_eq!(entry, Entry::default());
    }
}
