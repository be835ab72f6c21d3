//! The runtime value model of entry contents.
//!
//! Entries carry no schema: every namespace holds a [`Value`], a tagged union
//! of scalars, arrays and string-keyed objects. The [`crud`] module walks
//! nested objects by key path.

pub mod crud;
mod value;

pub use value::{ObjectMap, SerdeError, Value};
