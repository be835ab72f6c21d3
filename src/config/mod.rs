//! Declarative pipeline configuration.
//!
//! A pipeline is described as an ordered list of operators, each tagged with
//! its `type`:
//!
//! ```toml
//! [[operators]]
//! type = "add"
//! field = 'attributes["deployment.environment"]'
//! value = "production"
//!
//! [[operators]]
//! type = "move"
//! from = "body.message"
//! to = "attributes.message"
//! on_error = "drop"
//! ```
//!
//! Every field path is parsed while the configuration is loaded, so a
//! malformed path is reported before any entry is processed.

pub mod format;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::transforms::{
    AddConfig, CopyConfig, MoveConfig, OnError, Operator, Pipeline, RemoveConfig, RetainConfig,
};

pub use format::Format;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub operators: Vec<OperatorConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperatorConfig {
    Add(AddConfig),
    Remove(RemoveConfig),
    Move(MoveConfig),
    Copy(CopyConfig),
    Retain(RetainConfig),
}

impl OperatorConfig {
    pub const fn operator_type(&self) -> &'static str {
        match self {
            OperatorConfig::Add(_) => "add",
            OperatorConfig::Remove(_) => "remove",
            OperatorConfig::Move(_) => "move",
            OperatorConfig::Copy(_) => "copy",
            OperatorConfig::Retain(_) => "retain",
        }
    }

    pub const fn on_error(&self) -> OnError {
        match self {
            OperatorConfig::Add(config) => config.on_error,
            OperatorConfig::Remove(config) => config.on_error,
            OperatorConfig::Move(config) => config.on_error,
            OperatorConfig::Copy(config) => config.on_error,
            OperatorConfig::Retain(config) => config.on_error,
        }
    }

    pub fn build(&self) -> crate::Result<Box<dyn Operator>> {
        Ok(match self {
            OperatorConfig::Add(config) => Box::new(config.build()?),
            OperatorConfig::Remove(config) => Box::new(config.build()?),
            OperatorConfig::Move(config) => Box::new(config.build()?),
            OperatorConfig::Copy(config) => Box::new(config.build()?),
            OperatorConfig::Retain(config) => Box::new(config.build()?),
        })
    }
}

impl PipelineConfig {
    pub fn build(&self) -> crate::Result<Pipeline> {
        let mut pipeline = Pipeline::new();
        for operator in &self.operators {
            pipeline.push(operator.build()?, operator.on_error());
        }
        Ok(pipeline)
    }

    /// Builds every operator and reports all failures at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .operators
            .iter()
            .enumerate()
            .filter_map(|(index, operator)| {
                operator.build().err().map(|error| {
                    format!(
                        "Operator #{} ({}): {}",
                        index + 1,
                        operator.operator_type(),
                        error
                    )
                })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads and validates a pipeline configuration from a string.
pub fn load_from_str(input: &str, format: Format) -> Result<PipelineConfig, Vec<String>> {
    let config: PipelineConfig = format::deserialize(input, format)?;
    config.validate()?;
    debug!(
        message = "Loaded pipeline configuration.",
        operators = config.operators.len(),
        %format,
    );
    Ok(config)
}

/// Loads a pipeline configuration from a file, picking the format from its
/// extension and falling back to TOML.
pub fn load_from_path(path: &Path) -> Result<PipelineConfig, Vec<String>> {
    let format = Format::from_path(path).unwrap_or_default();
    let input = std::fs::read_to_string(path)
        .map_err(|error| vec![format!("Could not read {:?}: {}", path, error)])?;
    load_from_str(&input, format).map_err(|errors| {
        errors
            .into_iter()
            .map(|error| format!("{}: {}", path.display(), error))
            .collect()
    })
}
