//! Operators that reshape entries by field, and the pipeline that runs them.
//!
//! Operators are built once from configuration and then shared by every
//! worker processing entries. They hold only immutable fields and values, so
//! a [`Pipeline`] is `Send + Sync` and needs no locking.

pub mod add;
pub mod copy;
pub mod move_field;
pub mod remove;
pub mod retain;

use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::entry::{Entry, Field, FieldError};
use crate::internal_events::OperatorFailed;

pub use add::{AddConfig, AddOperator};
pub use copy::{CopyConfig, CopyOperator};
pub use move_field::{MoveConfig, MoveOperator};
pub use remove::{RemoveConfig, RemoveOperator};
pub use retain::{RetainConfig, RetainOperator};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransformError {
    #[snafu(display("Operator {} could not write {}: {}", operator, field, source))]
    Write {
        operator: &'static str,
        field: Field,
        source: FieldError,
    },

    #[snafu(display("Retained fields must share a parent, but {} and {} do not.", first, other))]
    MixedParents { first: Field, other: Field },

    #[snafu(display("Field {} cannot be retained; only keys below a namespace can.", field))]
    NotRetainable { field: Field },

    #[snafu(display("At least one field is required."))]
    NoFields,
}

/// A single step applied to each entry passing through a [`Pipeline`].
pub trait Operator: fmt::Debug + Send + Sync {
    /// The configuration `type` of this operator.
    fn name(&self) -> &'static str;

    /// Applies the operator to `entry` in place. A missing source field is not
    /// an error; operators leave the entry as is in that case.
    fn process(&self, entry: &mut Entry) -> Result<(), TransformError>;
}

/// What happens to an entry when an operator fails on it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Skip the failed operation and pass the entry on to the next operator.
    #[default]
    Skip,
    /// Stop processing and drop the entry.
    Drop,
}

#[derive(Debug)]
struct Stage {
    operator: Box<dyn Operator>,
    on_error: OnError,
}

/// An ordered list of operators.
#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operator: Box<dyn Operator>, on_error: OnError) {
        self.stages.push(Stage { operator, on_error });
    }

    #[must_use]
    pub fn with(mut self, operator: impl Operator + 'static, on_error: OnError) -> Self {
        self.push(Box::new(operator), on_error);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs every operator over `entry` in order. Returns `None` when an
    /// operator configured with [`OnError::Drop`] fails.
    pub fn process(&self, mut entry: Entry) -> Option<Entry> {
        for stage in &self.stages {
            if let Err(error) = stage.operator.process(&mut entry) {
                let drop_entry = stage.on_error == OnError::Drop;
                emit!(OperatorFailed {
                    operator: stage.operator.name(),
                    error: &error,
                    drop_entry,
                });
                if drop_entry {
                    return None;
                }
            }
        }
        Some(entry)
    }

    pub fn process_batch(&self, entries: Vec<Entry>) -> Vec<Entry> {
        entries
            .into_iter()
            .filter_map(|entry| self.process(entry))
            .collect()
    }
}
