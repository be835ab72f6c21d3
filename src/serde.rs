use std::str::FromStr;

use entry_value::Value;
use serde::{de, Deserialize, Deserializer};

use crate::entry::FieldError;

pub const fn default_true() -> bool {
    true
}

/// Deserializes a type from a single text scalar through its `FromStr`.
///
/// Any input that is not a string, in any format, is rejected with
/// [`FieldError::NotAString`].
pub fn deserialize_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = FieldError>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value.as_str() {
        Some(text) => text,
        None => {
            return Err(de::Error::custom(FieldError::NotAString {
                found: value.kind_str(),
            }))
        }
    };
    text.parse().map_err(de::Error::custom)
}
