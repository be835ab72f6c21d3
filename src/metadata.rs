//! Resource metadata changes and the contract for exporting them.
//!
//! A metadata source (a Kubernetes watcher, a cloud instance lookup) tracks a
//! flat string map per resource. Each time it changes, the difference is
//! described as a [`MetadataDelta`], delivered to every [`MetadataExporter`]
//! and applied to entries under a resource field.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::{ensure, Snafu};

use crate::entry::{Entry, FieldError, ResourceField};
use crate::internal_events::MetadataDeltaApplied;

#[derive(Debug, Snafu)]
pub enum MetadataError {
    #[snafu(display("Metadata updates require a resource id key."))]
    EmptyResourceIdKey,

    #[snafu(display("Metadata update for {} has an empty resource id.", resource_id_key))]
    EmptyResourceId { resource_id_key: String },
}

/// Identifies the resource a set of metadata belongs to, such as a pod uid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// The change between two versions of a resource's metadata.
///
/// The three maps never share a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDelta {
    pub metadata_to_add: BTreeMap<String, String>,
    pub metadata_to_remove: BTreeMap<String, String>,
    pub metadata_to_update: BTreeMap<String, String>,
}

impl MetadataDelta {
    /// Computes the delta turning `old` into `new`. Removed keys carry their
    /// last known value, updated keys their new one.
    pub fn between(old: &BTreeMap<String, String>, new: &BTreeMap<String, String>) -> Self {
        let mut delta = Self::default();
        for (key, value) in new {
            match old.get(key) {
                None => {
                    delta.metadata_to_add.insert(key.clone(), value.clone());
                }
                Some(previous) if previous != value => {
                    delta.metadata_to_update.insert(key.clone(), value.clone());
                }
                Some(_) => {}
            }
        }
        for (key, value) in old {
            if !new.contains_key(key) {
                delta.metadata_to_remove.insert(key.clone(), value.clone());
            }
        }
        delta
    }

    pub fn is_empty(&self) -> bool {
        self.metadata_to_add.is_empty()
            && self.metadata_to_remove.is_empty()
            && self.metadata_to_update.is_empty()
    }

    /// Applies the delta to the object at `field`: added and updated keys are
    /// written as strings and removed keys are deleted.
    pub fn apply(&self, entry: &mut Entry, field: &ResourceField) -> Result<(), FieldError> {
        for (key, value) in self.metadata_to_add.iter().chain(&self.metadata_to_update) {
            field.child(key.as_str()).set(entry, value.as_str().into())?;
        }
        for key in self.metadata_to_remove.keys() {
            field.child(key.as_str()).delete(entry);
        }
        Ok(())
    }
}

/// A metadata change for a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    /// The name of the attribute identifying the resource, like `k8s.pod.uid`.
    pub resource_id_key: String,
    pub resource_id: ResourceId,
    pub metadata_delta: MetadataDelta,
}

impl MetadataUpdate {
    pub fn new(
        resource_id_key: impl Into<String>,
        resource_id: impl Into<ResourceId>,
        metadata_delta: MetadataDelta,
    ) -> Result<Self, MetadataError> {
        let resource_id_key = resource_id_key.into();
        let resource_id = resource_id.into();
        ensure!(!resource_id_key.is_empty(), EmptyResourceIdKeySnafu);
        ensure!(
            !resource_id.as_str().is_empty(),
            EmptyResourceIdSnafu {
                resource_id_key: resource_id_key.clone(),
            }
        );
        Ok(Self {
            resource_id_key,
            resource_id,
            metadata_delta,
        })
    }

    /// Applies the delta under `field`, see [`MetadataDelta::apply`].
    pub fn apply(&self, entry: &mut Entry, field: &ResourceField) -> Result<(), FieldError> {
        self.metadata_delta.apply(entry, field)?;
        emit!(MetadataDeltaApplied {
            resource_id: &self.resource_id,
            added: self.metadata_delta.metadata_to_add.len(),
            updated: self.metadata_delta.metadata_to_update.len(),
            removed: self.metadata_delta.metadata_to_remove.len(),
        });
        Ok(())
    }
}

/// Receives batches of metadata updates.
///
/// Exporters are shared across the threads producing updates, so
/// implementations synchronize any state of their own.
pub trait MetadataExporter: Send + Sync {
    fn consume_metadata(&self, updates: &[MetadataUpdate]) -> crate::Result<()>;
}
