use std::path::Path;

use anyhow::{Context, Result};
use evalml_core::metrics::MetricInputs;

pub(crate) fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads a `{predictions, references}` record from a JSON or YAML file.
pub(crate) fn read_inputs(path: &str) -> Result<MetricInputs> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path))?;
    let inputs = if is_yaml(path) {
        MetricInputs::from_yaml(&contents)
    } else {
        MetricInputs::from_json(&contents)
    };
    inputs.with_context(|| format!("Failed to parse data file {}", path))
}

/// Reads a keyword arguments object from a JSON or YAML file.
pub(crate) fn read_keywords(path: &str) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path))?;
    let value: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration file {}", path))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse configuration file {}", path))?
    };
    anyhow::ensure!(
        value.is_object(),
        "Configuration file {} must contain an object of keyword arguments",
        path
    );
    Ok(value)
}
