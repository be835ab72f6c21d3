//! Textual addressing for entry fields.
//!
//! A path is a namespace token optionally followed by key segments, either
//! `.bareword` or `["quoted key"]`:
//!
//! ```text
//! resource
//! resource.host
//! attributes["k8s.pod.name"]
//! body.nested["with space"].leaf
//! ```

mod encode;
mod error;
mod namespace;
mod parse;

pub use encode::{encode, is_bareword};
pub use error::PathParseError;
pub use namespace::Namespace;
pub use parse::decode;
