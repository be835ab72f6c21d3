//! Path references into an [`Entry`].
//!
//! A [`Field`] names one location in one namespace of an entry and knows how
//! to read, write, merge and delete the value there. Fields are immutable,
//! hold no data, and may be shared freely between operators and threads.
//!
//! Writes never fail because of the shape of the data already in the entry:
//! missing intermediate objects are created and non-object intermediates are
//! replaced. Reads and deletes report a miss (`None`) instead and leave the
//! entry untouched.

/// Implements construction, navigation between fields, and text encoding for
/// a field type bound to a single keyed namespace.
macro_rules! keyed_field {
    ($name:ident, $namespace:expr) => {
        impl $name {
            pub fn new<I, S>(keys: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                Self {
                    keys: keys.into_iter().map(Into::into).collect(),
                }
            }

            pub fn root() -> Self {
                Self { keys: Vec::new() }
            }

            pub fn is_root(&self) -> bool {
                self.keys.is_empty()
            }

            #[must_use]
            pub fn parent(&self) -> Self {
                match self.keys.split_last() {
                    Some((_, parent)) => Self {
                        keys: parent.to_vec(),
                    },
                    None => self.clone(),
                }
            }

            #[must_use]
            pub fn child(&self, key: impl Into<String>) -> Self {
                let mut keys = Vec::with_capacity(self.keys.len() + 1);
                keys.extend_from_slice(&self.keys);
                keys.push(key.into());
                Self { keys }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&entry_path::encode($namespace, &self.keys))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::entry::FieldError;

            fn from_str(path: &str) -> Result<Self, Self::Err> {
                let (namespace, keys) = $crate::entry::field::decode(path)?;
                snafu::ensure!(
                    namespace == $namespace,
                    $crate::entry::field::WrongNamespaceSnafu {
                        path,
                        expected: $namespace.as_str(),
                    }
                );
                Ok(Self { keys })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::serde::deserialize_text(deserializer)
            }
        }
    };
}

mod attribute;
mod body;
mod fixed;
mod map;
mod resource;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use entry_path::{Namespace, PathParseError};
use entry_value::{ObjectMap, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::Snafu;

pub use attribute::AttributeField;
pub use body::BodyField;
pub use fixed::FixedField;
pub use resource::ResourceField;

use super::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FieldError {
    #[snafu(display(
        "Cannot set the {} root to a {}; only an object can be merged into it.",
        namespace,
        kind
    ))]
    RootAssignment {
        namespace: Namespace,
        kind: &'static str,
    },

    #[snafu(display("Cannot merge an object into single-value field {}.", field))]
    MergeIntoScalar { field: FixedField },

    #[snafu(display("Field {} expects {}, found {}.", field, expected, found))]
    InvalidFixedValue {
        field: FixedField,
        expected: &'static str,
        found: &'static str,
    },

    #[snafu(display("Invalid field {:?}: {}", path, source))]
    Parse {
        path: String,
        source: PathParseError,
    },

    #[snafu(display("Field {:?} must start with {}.", path, expected))]
    WrongNamespace {
        path: String,
        expected: &'static str,
    },

    #[snafu(display("The field is not a string, found {}.", found))]
    NotAString { found: &'static str },
}

/// A reference to a location inside an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Resource(ResourceField),
    Attribute(AttributeField),
    Body(BodyField),
    Fixed(FixedField),
}

impl Field {
    pub fn resource<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Resource(ResourceField::new(keys))
    }

    pub fn attribute<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Attribute(AttributeField::new(keys))
    }

    pub fn body<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Body(BodyField::new(keys))
    }

    pub const fn namespace(&self) -> Namespace {
        match self {
            Field::Resource(_) => Namespace::Resource,
            Field::Attribute(_) => Namespace::Attributes,
            Field::Body(_) => Namespace::Body,
            Field::Fixed(field) => field.namespace(),
        }
    }

    /// The keys below the namespace; empty for roots and fixed fields.
    pub fn keys(&self) -> &[String] {
        match self {
            Field::Resource(field) => &field.keys,
            Field::Attribute(field) => &field.keys,
            Field::Body(field) => &field.keys,
            Field::Fixed(_) => &[],
        }
    }

    pub fn is_root(&self) -> bool {
        self.keys().is_empty()
    }

    /// Drops the last key. The root of a namespace is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self {
            Field::Resource(field) => Field::Resource(field.parent()),
            Field::Attribute(field) => Field::Attribute(field.parent()),
            Field::Body(field) => Field::Body(field.parent()),
            Field::Fixed(field) => Field::Fixed(*field),
        }
    }

    /// Appends a key. Fixed fields hold a single value and have no children,
    /// so they return themselves.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        match self {
            Field::Resource(field) => Field::Resource(field.child(key)),
            Field::Attribute(field) => Field::Attribute(field.child(key)),
            Field::Body(field) => Field::Body(field.child(key)),
            Field::Fixed(field) => Field::Fixed(*field),
        }
    }

    /// Reads the value this field points at, or `None` when it is absent.
    pub fn get<'a>(&self, entry: &'a Entry) -> Option<Cow<'a, Value>> {
        match self {
            Field::Resource(field) => field.get(entry),
            Field::Attribute(field) => field.get(entry),
            Field::Body(field) => field.get(entry),
            Field::Fixed(field) => field.get(entry),
        }
    }

    /// Writes `value` at this field. An object written below a namespace root
    /// is merged into whatever object is already there.
    pub fn set(&self, entry: &mut Entry, value: impl Into<Value>) -> Result<(), FieldError> {
        let value = value.into();
        match self {
            Field::Resource(field) => field.set(entry, value),
            Field::Attribute(field) => field.set(entry, value),
            Field::Body(field) => field.set(entry, value),
            Field::Fixed(field) => field.set(entry, value),
        }
    }

    /// Overlays `values` onto the object at this field, creating it if needed.
    pub fn merge(&self, entry: &mut Entry, values: ObjectMap) -> Result<(), FieldError> {
        match self {
            Field::Resource(field) => {
                field.merge(entry, values);
                Ok(())
            }
            Field::Attribute(field) => {
                field.merge(entry, values);
                Ok(())
            }
            Field::Body(field) => {
                field.merge(entry, values);
                Ok(())
            }
            Field::Fixed(field) => MergeIntoScalarSnafu { field: *field }.fail(),
        }
    }

    /// Removes the value at this field and returns it, or `None` when nothing
    /// was there to remove.
    pub fn delete(&self, entry: &mut Entry) -> Option<Value> {
        match self {
            Field::Resource(field) => field.delete(entry),
            Field::Attribute(field) => field.delete(entry),
            Field::Body(field) => field.delete(entry),
            Field::Fixed(field) => field.delete(entry),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Resource(field) => fmt::Display::fmt(field, f),
            Field::Attribute(field) => fmt::Display::fmt(field, f),
            Field::Body(field) => fmt::Display::fmt(field, f),
            Field::Fixed(field) => fmt::Display::fmt(field, f),
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let (namespace, keys) = decode(path)?;
        Ok(match namespace {
            Namespace::Resource => Field::Resource(ResourceField { keys }),
            Namespace::Attributes => Field::Attribute(AttributeField { keys }),
            Namespace::Body => Field::Body(BodyField { keys }),
            namespace => Field::Fixed(FixedField::from_namespace(namespace).ok_or_else(
                || FieldError::WrongNamespace {
                    path: path.to_owned(),
                    expected: "a known namespace",
                },
            )?),
        })
    }
}

impl From<ResourceField> for Field {
    fn from(field: ResourceField) -> Self {
        Field::Resource(field)
    }
}

impl From<AttributeField> for Field {
    fn from(field: AttributeField) -> Self {
        Field::Attribute(field)
    }
}

impl From<BodyField> for Field {
    fn from(field: BodyField) -> Self {
        Field::Body(field)
    }
}

impl From<FixedField> for Field {
    fn from(field: FixedField) -> Self {
        Field::Fixed(field)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde::deserialize_text(deserializer)
    }
}

pub(crate) fn decode(path: &str) -> Result<(Namespace, Vec<String>), FieldError> {
    entry_path::decode(path).map_err(|source| FieldError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests;
