//! Shared navigation for namespaces whose root is an object that stays absent
//! until first written.

use std::borrow::Cow;

use entry_path::Namespace;
use entry_value::{crud, ObjectMap, Value};

use super::{FieldError, RootAssignmentSnafu};

pub(super) fn get<'a>(root: Option<&'a ObjectMap>, keys: &[String]) -> Option<Cow<'a, Value>> {
    let root = root?;
    if keys.is_empty() {
        return Some(Cow::Owned(Value::Object(root.clone())));
    }
    crud::get(root, keys).map(Cow::Borrowed)
}

pub(super) fn set(
    root: &mut Option<ObjectMap>,
    namespace: Namespace,
    keys: &[String],
    value: Value,
) -> Result<(), FieldError> {
    match value {
        Value::Object(values) => {
            merge(root, keys, values);
            Ok(())
        }
        value if keys.is_empty() => RootAssignmentSnafu {
            namespace,
            kind: value.kind_str(),
        }
        .fail(),
        value => {
            crud::insert(root.get_or_insert_with(ObjectMap::new), keys, value);
            Ok(())
        }
    }
}

pub(super) fn merge(root: &mut Option<ObjectMap>, keys: &[String], values: ObjectMap) {
    crud::merge(root.get_or_insert_with(ObjectMap::new), keys, values);
}

pub(super) fn delete(root: &mut Option<ObjectMap>, keys: &[String]) -> Option<Value> {
    if keys.is_empty() {
        return root.take().map(Value::Object);
    }
    crud::remove(root.as_mut()?, keys)
}
