use metrics::counter;

use super::InternalEvent;
use crate::transforms::TransformError;

#[derive(Debug)]
pub struct OperatorFailed<'a> {
    pub operator: &'static str,
    pub error: &'a TransformError,
    /// Whether the entry is dropped because of this failure. Otherwise the
    /// failed operation is skipped and processing continues.
    pub drop_entry: bool,
}

impl InternalEvent for OperatorFailed<'_> {
    fn emit_logs(&self) {
        warn!(
            message = "Operator failed.",
            operator = self.operator,
            error = %self.error,
            drop_entry = self.drop_entry,
        );
    }

    fn emit_metrics(&self) {
        counter!("operator_errors_total", "operator" => self.operator).increment(1);
        if self.drop_entry {
            emit!(EntryDropped {
                operator: self.operator,
                reason: "Operator failed.",
            });
        }
    }
}

#[derive(Debug)]
pub struct EntryDropped {
    pub operator: &'static str,
    pub reason: &'static str,
}

impl InternalEvent for EntryDropped {
    fn emit_logs(&self) {
        debug!(
            message = "Entry dropped.",
            operator = self.operator,
            reason = self.reason,
        );
    }

    fn emit_metrics(&self) {
        counter!("entries_dropped_total", "operator" => self.operator).increment(1);
    }
}
