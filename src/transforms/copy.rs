use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use super::{OnError, Operator, TransformError, WriteSnafu};
use crate::entry::{Entry, Field};
use crate::internal_events::FieldMissing;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    pub from: Field,
    pub to: Field,
    #[serde(default)]
    pub on_error: OnError,
}

impl CopyConfig {
    pub fn build(&self) -> crate::Result<CopyOperator> {
        Ok(CopyOperator::new(self.from.clone(), self.to.clone()))
    }
}

/// Copies the value at one field to another, leaving the source in place.
#[derive(Debug, Clone)]
pub struct CopyOperator {
    from: Field,
    to: Field,
}

impl CopyOperator {
    pub fn new(from: Field, to: Field) -> Self {
        Self { from, to }
    }
}

impl Operator for CopyOperator {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn process(&self, entry: &mut Entry) -> Result<(), TransformError> {
        let Some(value) = self.from.get(entry).map(|value| value.into_owned()) else {
            emit!(FieldMissing {
                operator: self.name(),
                field: &self.from,
            });
            return Ok(());
        };

        self.to.set(entry, value).context(WriteSnafu {
            operator: self.name(),
            field: self.to.clone(),
        })
    }
}
