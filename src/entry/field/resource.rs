use std::borrow::Cow;

use entry_path::Namespace;
use entry_value::{ObjectMap, Value};

use super::{map, FieldError};
use crate::entry::Entry;

/// A path into an entry's resource.
///
/// The resource root is an object that is absent until first written. Setting
/// the root merges an object into it; any other value is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceField {
    pub keys: Vec<String>,
}

keyed_field!(ResourceField, Namespace::Resource);

impl ResourceField {
    pub fn get<'a>(&self, entry: &'a Entry) -> Option<Cow<'a, Value>> {
        map::get(entry.resource.as_ref(), &self.keys)
    }

    /// Sets a value on the resource. A value already at the field is
    /// overwritten, and an object value is merged into the object there.
    pub fn set(&self, entry: &mut Entry, value: Value) -> Result<(), FieldError> {
        map::set(&mut entry.resource, Namespace::Resource, &self.keys, value)
    }

    /// Merges `values` into the object at this field, overwriting any
    /// intermediate values as necessary.
    pub fn merge(&self, entry: &mut Entry, values: ObjectMap) {
        map::merge(&mut entry.resource, &self.keys, values);
    }

    /// Removes the value at this field. Deleting the root clears the whole
    /// resource.
    pub fn delete(&self, entry: &mut Entry) -> Option<Value> {
        map::delete(&mut entry.resource, &self.keys)
    }
}
