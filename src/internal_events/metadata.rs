use metrics::counter;

use super::InternalEvent;
use crate::metadata::ResourceId;

#[derive(Debug)]
pub struct MetadataDeltaApplied<'a> {
    pub resource_id: &'a ResourceId,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

impl InternalEvent for MetadataDeltaApplied<'_> {
    fn emit_logs(&self) {
        trace!(
            message = "Applied metadata delta.",
            resource_id = %self.resource_id,
            added = self.added,
            updated = self.updated,
            removed = self.removed,
        );
    }

    fn emit_metrics(&self) {
        counter!("metadata_keys_changed_total")
            .increment((self.added + self.updated + self.removed) as u64);
    }
}
