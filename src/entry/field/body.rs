use std::borrow::Cow;

use entry_path::Namespace;
use entry_value::{crud, ObjectMap, Value};

use super::FieldError;
use crate::entry::Entry;

/// A path into an entry's body.
///
/// Unlike the resource and attributes, the body may hold any value, so
/// setting the body root replaces it outright, objects included. Keyed writes
/// turn a non-object body into an object first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyField {
    pub keys: Vec<String>,
}

keyed_field!(BodyField, Namespace::Body);

impl BodyField {
    pub fn get<'a>(&self, entry: &'a Entry) -> Option<Cow<'a, Value>> {
        let body = entry.body.as_ref()?;
        crud::get_value(body, &self.keys).map(Cow::Borrowed)
    }

    pub fn set(&self, entry: &mut Entry, value: Value) -> Result<(), FieldError> {
        if self.is_root() {
            entry.body = Some(value);
            return Ok(());
        }

        let body = body_object_mut(entry);
        match value {
            Value::Object(values) => crud::merge(body, &self.keys, values),
            value => {
                crud::insert(body, &self.keys, value);
            }
        }
        Ok(())
    }

    pub fn merge(&self, entry: &mut Entry, values: ObjectMap) {
        crud::merge(body_object_mut(entry), &self.keys, values);
    }

    pub fn delete(&self, entry: &mut Entry) -> Option<Value> {
        if self.is_root() {
            return entry.body.take();
        }
        let body = entry.body.as_mut()?.as_object_mut()?;
        crud::remove(body, &self.keys)
    }
}

fn body_object_mut(entry: &mut Entry) -> &mut ObjectMap {
    crud::ensure_object(
        entry
            .body
            .get_or_insert_with(|| Value::Object(ObjectMap::new())),
    )
}
