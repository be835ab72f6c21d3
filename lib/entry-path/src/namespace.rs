use std::fmt;
use std::str::FromStr;

use crate::PathParseError;

/// A top-level addressable region of an entry.
///
/// `Resource`, `Attributes` and `Body` are keyed namespaces: a path may
/// continue into them with key segments. Every other namespace names a single
/// fixed value and never carries keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Resource,
    Attributes,
    Body,
    Timestamp,
    ObservedTimestamp,
    Severity,
    SeverityText,
    TraceId,
    SpanId,
    TraceFlags,
    ScopeName,
}

impl Namespace {
    pub const ALL: [Namespace; 11] = [
        Namespace::Resource,
        Namespace::Attributes,
        Namespace::Body,
        Namespace::Timestamp,
        Namespace::ObservedTimestamp,
        Namespace::Severity,
        Namespace::SeverityText,
        Namespace::TraceId,
        Namespace::SpanId,
        Namespace::TraceFlags,
        Namespace::ScopeName,
    ];

    /// The token this namespace is written as in path text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Namespace::Resource => "resource",
            Namespace::Attributes => "attributes",
            Namespace::Body => "body",
            Namespace::Timestamp => "timestamp",
            Namespace::ObservedTimestamp => "observed_timestamp",
            Namespace::Severity => "severity",
            Namespace::SeverityText => "severity_text",
            Namespace::TraceId => "trace_id",
            Namespace::SpanId => "span_id",
            Namespace::TraceFlags => "trace_flags",
            Namespace::ScopeName => "scope_name",
        }
    }

    /// Whether paths into this namespace may carry key segments.
    pub const fn is_keyed(self) -> bool {
        matches!(
            self,
            Namespace::Resource | Namespace::Attributes | Namespace::Body
        )
    }

    pub fn tokens() -> Vec<&'static str> {
        Self::ALL.iter().map(|namespace| namespace.as_str()).collect()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|namespace| namespace.as_str() == s)
            .ok_or_else(|| PathParseError::UnknownNamespace {
                namespace: s.to_owned(),
            })
    }
}
