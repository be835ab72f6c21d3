use entry_value::Value;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use super::{OnError, Operator, TransformError, WriteSnafu};
use crate::entry::{Entry, Field};
use crate::internal_events::{FieldNotOverwritten, FieldOverwritten};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AddConfig {
    pub field: Field,
    pub value: Value,
    #[serde(default = "crate::serde::default_true")]
    pub overwrite: bool,
    #[serde(default)]
    pub on_error: OnError,
}

impl AddConfig {
    pub fn build(&self) -> crate::Result<AddOperator> {
        Ok(AddOperator::new(
            self.field.clone(),
            self.value.clone(),
            self.overwrite,
        ))
    }
}

/// Writes a constant value at a field.
#[derive(Debug, Clone)]
pub struct AddOperator {
    field: Field,
    value: Value,
    overwrite: bool,
}

impl AddOperator {
    pub fn new(field: Field, value: Value, overwrite: bool) -> Self {
        Self {
            field,
            value,
            overwrite,
        }
    }
}

impl Operator for AddOperator {
    fn name(&self) -> &'static str {
        "add"
    }

    fn process(&self, entry: &mut Entry) -> Result<(), TransformError> {
        let exists = self.field.get(entry).is_some();
        if exists && !self.overwrite {
            emit!(FieldNotOverwritten { field: &self.field });
            return Ok(());
        }

        self.field
            .set(entry, self.value.clone())
            .context(WriteSnafu {
                operator: self.name(),
                field: self.field.clone(),
            })?;
        if exists {
            emit!(FieldOverwritten { field: &self.field });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    fn add(path: &str, value: impl Into<Value>, overwrite: bool) -> AddOperator {
        AddOperator::new(path.parse().unwrap(), value.into(), overwrite)
    }

    fn entry() -> Entry {
        let mut entry = Entry::with_body("augment me");
        entry.set(&"attributes.existing".parse().unwrap(), "old").unwrap();
        entry
    }

    #[test]
    fn adds_missing_field() {
        let mut entry = entry();
        add("attributes.new_key", "new_val", true)
            .process(&mut entry)
            .unwrap();
        assert_eq!(
            entry.attributes,
            Value::from(json!({ "existing": "old", "new_key": "new_val" })).into_object()
        );
    }

    #[test]
    fn overwrite() {
        let mut entry = entry();
        add("attributes.existing", "new", true)
            .process(&mut entry)
            .unwrap();
        assert_eq!(
            entry.get(&"attributes.existing".parse().unwrap()).as_deref(),
            Some(&Value::from("new"))
        );
    }

    #[test]
    fn no_overwrite() {
        let mut entry = entry();
        let operator = add("attributes.existing", "new", false);
        operator.process(&mut entry).unwrap();
        assert_eq!(
            entry.get(&"attributes.existing".parse().unwrap()).as_deref(),
            Some(&Value::from("old"))
        );

        operator.process(&mut Entry::default()).unwrap();
    }

    #[test]
    fn no_overwrite_fills_unset_severity() {
        use crate::entry::Severity;

        let operator = add("severity", "warn", false);

        let mut entry = Entry::default();
        operator.process(&mut entry).unwrap();
        assert_eq!(entry.severity, Severity::WARN);

        let mut entry = Entry::default();
        entry.severity = Severity::ERROR;
        operator.process(&mut entry).unwrap();
        assert_eq!(entry.severity, Severity::ERROR);
    }

    #[test]
    fn adds_object_into_resource_root() {
        let mut entry = Entry::default();
        add("resource", Value::from(json!({ "host": "a" })), true)
            .process(&mut entry)
            .unwrap();
        add("resource", Value::from(json!({ "region": "b" })), true)
            .process(&mut entry)
            .unwrap();
        assert_eq!(
            entry.resource,
            Value::from(json!({ "host": "a", "region": "b" })).into_object()
        );
    }

    #[test]
    fn reports_invalid_write() {
        let mut entry = Entry::default();
        let error = add("severity", "loud", true)
            .process(&mut entry)
            .unwrap_err();
        assert!(matches!(
            error,
            TransformError::Write {
                operator: "add",
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "Operator add could not write severity: Field severity expects a severity number 0..=24 or level name, found string."
        );
    }

    #[test]
    fn config_defaults() {
        let config: AddConfig =
            serde_json::from_value(json!({ "field": "body.a", "value": 1 })).unwrap();
        assert!(config.overwrite);
        assert_eq!(config.on_error, OnError::Skip);

        let error = serde_json::from_value::<AddConfig>(json!({
            "field": "body.a",
            "value": 1,
            "unknown": true,
        }))
        .unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }
}
