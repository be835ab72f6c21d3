use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use super::{OnError, Operator, TransformError, WriteSnafu};
use crate::entry::{Entry, Field};
use crate::internal_events::FieldMissing;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MoveConfig {
    pub from: Field,
    pub to: Field,
    #[serde(default)]
    pub on_error: OnError,
}

impl MoveConfig {
    pub fn build(&self) -> crate::Result<MoveOperator> {
        Ok(MoveOperator::new(self.from.clone(), self.to.clone()))
    }
}

/// Moves the value at one field to another.
///
/// The source is removed before the destination is written, so moving a field
/// into one of its own children works. If the destination rejects the value,
/// the source is restored and the entry is left as it was.
#[derive(Debug, Clone)]
pub struct MoveOperator {
    from: Field,
    to: Field,
}

impl MoveOperator {
    pub fn new(from: Field, to: Field) -> Self {
        Self { from, to }
    }
}

impl Operator for MoveOperator {
    fn name(&self) -> &'static str {
        "move"
    }

    fn process(&self, entry: &mut Entry) -> Result<(), TransformError> {
        let Some(value) = self.from.delete(entry) else {
            emit!(FieldMissing {
                operator: self.name(),
                field: &self.from,
            });
            return Ok(());
        };

        match self.to.set(entry, value.clone()) {
            Ok(()) => Ok(()),
            Err(source) => {
                // Put the value back where it came from.
                let _ = self.from.set(entry, value);
                Err(source).context(WriteSnafu {
                    operator: self.name(),
                    field: self.to.clone(),
                })
            }
        }
    }
}
