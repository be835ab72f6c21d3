use metrics::counter;

use super::InternalEvent;
use crate::entry::Field;

#[derive(Debug)]
pub struct FieldMissing<'a> {
    pub operator: &'static str,
    pub field: &'a Field,
}

impl InternalEvent for FieldMissing<'_> {
    fn emit_logs(&self) {
        debug!(
            message = "Field did not exist.",
            operator = self.operator,
            field = %self.field,
        );
    }

    fn emit_metrics(&self) {
        counter!("field_missing_total", "operator" => self.operator).increment(1);
    }
}

#[derive(Debug)]
pub struct FieldOverwritten<'a> {
    pub field: &'a Field,
}

impl InternalEvent for FieldOverwritten<'_> {
    fn emit_logs(&self) {
        debug!(message = "Field overwritten.", field = %self.field);
    }
}

#[derive(Debug)]
pub struct FieldNotOverwritten<'a> {
    pub field: &'a Field,
}

impl InternalEvent for FieldNotOverwritten<'_> {
    fn emit_logs(&self) {
        debug!(message = "Field not overwritten.", field = %self.field);
    }

    fn emit_metrics(&self) {
        counter!("field_not_overwritten_total").increment(1);
    }
}
