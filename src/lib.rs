//! Field addressing and in-place mutation of telemetry entries.
//!
//! An [`Entry`] is a single log record with a `resource`, `attributes`, a
//! `body`, and a handful of single-value fields such as `timestamp` and
//! `severity`. A [`Field`] names one location in an entry using path text
//! like `resource.host` or `attributes["k8s.pod.name"]`, and reads or writes
//! the value there. Operators built from a [`config::PipelineConfig`] apply
//! fields to every entry flowing through a [`transforms::Pipeline`].
//!
//! ```
//! use entry_pipeline::{Entry, Field};
//!
//! let mut entry = Entry::with_body("hello");
//! let field: Field = r#"attributes["http.method"]"#.parse().unwrap();
//! entry.set(&field, "GET").unwrap();
//!
//! assert_eq!(entry.get(&field).unwrap().as_str(), Some("GET"));
//! assert_eq!(field.to_string(), r#"attributes["http.method"]"#);
//! ```

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod internal_events;

pub mod config;
pub mod entry;
pub mod metadata;
pub mod serde;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_util;
pub mod transforms;

pub use entry::{Entry, Field, FieldError, Severity};
pub use entry_path::{Namespace, PathParseError};
pub use entry_value::Value;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;
