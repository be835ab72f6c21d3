use std::borrow::Cow;

use entry_path::Namespace;
use entry_value::{ObjectMap, Value};

use super::{map, FieldError};
use crate::entry::Entry;

/// A path into an entry's attributes. Root handling matches
/// [`ResourceField`](super::ResourceField).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeField {
    pub keys: Vec<String>,
}

keyed_field!(AttributeField, Namespace::Attributes);

impl AttributeField {
    pub fn get<'a>(&self, entry: &'a Entry) -> Option<Cow<'a, Value>> {
        map::get(entry.attributes.as_ref(), &self.keys)
    }

    pub fn set(&self, entry: &mut Entry, value: Value) -> Result<(), FieldError> {
        map::set(&mut entry.attributes, Namespace::Attributes, &self.keys, value)
    }

    pub fn merge(&self, entry: &mut Entry, values: ObjectMap) {
        map::merge(&mut entry.attributes, &self.keys, values);
    }

    /// Removes the value at this field. Deleting the root clears the whole
    /// attribute map.
    pub fn delete(&self, entry: &mut Entry) -> Option<Value> {
        map::delete(&mut entry.attributes, &self.keys)
    }
}
