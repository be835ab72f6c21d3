use entry_value::{ObjectMap, Value};
use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt, ResultExt};

use super::{
    MixedParentsSnafu, NoFieldsSnafu, NotRetainableSnafu, OnError, Operator, TransformError,
    WriteSnafu,
};
use crate::entry::{Entry, Field};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RetainConfig {
    pub fields: Vec<Field>,
    #[serde(default)]
    pub on_error: OnError,
}

impl RetainConfig {
    pub fn build(&self) -> crate::Result<RetainOperator> {
        Ok(RetainOperator::new(self.fields.clone())?)
    }
}

/// Keeps only the listed keys of one object, dropping all of its other keys.
///
/// Every field must be a key below a namespace, and all of them must share the
/// same parent.
#[derive(Debug, Clone)]
pub struct RetainOperator {
    parent: Field,
    keys: Vec<String>,
}

impl RetainOperator {
    pub fn new(fields: Vec<Field>) -> Result<Self, TransformError> {
        let first = fields.first().cloned().context(NoFieldsSnafu)?;
        let parent = first.parent();

        let mut keys = Vec::with_capacity(fields.len());
        for field in fields {
            let Some(key) = field.keys().last().cloned() else {
                return NotRetainableSnafu { field }.fail();
            };
            ensure!(
                field.parent() == parent,
                MixedParentsSnafu {
                    first: first.clone(),
                    other: field,
                }
            );
            keys.push(key);
        }

        Ok(Self { parent, keys })
    }
}

impl Operator for RetainOperator {
    fn name(&self) -> &'static str {
        "retain"
    }

    fn process(&self, entry: &mut Entry) -> Result<(), TransformError> {
        let retained = match self.parent.get(entry).as_deref() {
            Some(Value::Object(map)) => self
                .keys
                .iter()
                .filter_map(|key| map.get(key).map(|value| (key.clone(), value.clone())))
                .collect::<ObjectMap>(),
            _ => return Ok(()),
        };

        // Setting an object merges it into the object already there, so the
        // parent is cleared first.
        self.parent.delete(entry);
        self.parent
            .set(entry, Value::Object(retained))
            .context(WriteSnafu {
                operator: self.name(),
                field: self.parent.clone(),
            })
    }
}
