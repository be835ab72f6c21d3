//! The text formats a pipeline configuration can be written in.

#![deny(missing_docs, missing_debug_implementations)]

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{de, ser};

/// The format used to represent the configuration data.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Format {
    /// TOML format is used.
    #[default]
    Toml,
    /// JSON format is used.
    Json,
    /// YAML format is used.
    Yaml,
}

impl Format {
    /// The canonical lowercase name of the format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Obtain the format from the file path using extension as a hint.
    ///
    /// Extensions are matched case-sensitively; the path is handed back when
    /// no format matches.
    pub fn from_path<T: AsRef<Path>>(path: T) -> Result<Self, T> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Format::Toml),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(path),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Format::Toml),
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(format!("Invalid format: {}", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the string represented in the specified format.
///
/// Errors are returned as messages so they can be combined with validation
/// errors found after parsing.
pub fn deserialize<T>(content: &str, format: Format) -> Result<T, Vec<String>>
where
    T: de::DeserializeOwned,
{
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| vec![e.to_string()]),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| vec![e.to_string()]),
        Format::Json => serde_json::from_str(content).map_err(|e| vec![e.to_string()]),
    }
}

/// Serialize the specified `value` into a string.
pub fn serialize<T>(value: &T, format: Format) -> Result<String, String>
where
    T: ser::Serialize,
{
    match format {
        Format::Toml => toml::to_string(value).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::PipelineConfig;

    #[rstest]
    #[case("pipeline.toml", Some(Format::Toml))]
    #[case("/etc/entries/pipeline.toml", Some(Format::Toml))]
    #[case("pipeline.v2.yaml", Some(Format::Yaml))]
    #[case("pipeline.yml", Some(Format::Yaml))]
    #[case("dir/pipeline.json", Some(Format::Json))]
    #[case("", None)]
    #[case("pipeline", None)]
    #[case(".toml", None)]
    #[case("pipeline.TOML", None)]
    #[case("pipeline.json.bak", None)]
    fn from_path(#[case] path: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_path(path).ok(), expected, "{}", path);
    }

    #[test]
    fn parse_names() {
        assert_eq!("TOML".parse::<Format>(), Ok(Format::Toml));
        assert_eq!("yml".parse::<Format>(), Ok(Format::Yaml));
        assert_eq!("Json".parse::<Format>(), Ok(Format::Json));
        assert!("ini".parse::<Format>().is_err());
        assert_eq!(Format::default().to_string(), "toml");
    }

    #[test]
    fn deserialize_reports_errors() {
        let errors = deserialize::<PipelineConfig>("", Format::Json).unwrap_err();
        assert_eq!(errors, vec!["EOF while parsing a value at line 1 column 0"]);

        let errors = deserialize::<PipelineConfig>("operators = [", Format::Toml).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
