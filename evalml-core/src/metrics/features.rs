use std::collections::BTreeMap;

use derive_more::Display;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::ClassLabel,
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq, Eq, Clone, Copy, Display)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "float")]
    Float,
    #[display(fmt = "string")]
    String,
}

/// Declared input schema of a metric: field name to value type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Features(BTreeMap<String, FeatureType>);

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature(mut self, name: &str, feature_type: FeatureType) -> Self {
        self.0.insert(name.to_owned(), feature_type);
        self
    }

    pub fn get(&self, name: &str) -> Option<FeatureType> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FeatureType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}

/// The record a harness hands to `Metric::compute`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricInputs {
    pub predictions: Vec<ClassLabel>,
    pub references: Vec<ClassLabel>,
}

impl MetricInputs {
    pub fn new(predictions: Vec<ClassLabel>, references: Vec<ClassLabel>) -> Self {
        MetricInputs {
            predictions,
            references,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ParserError(format!("Failed to parse inputs: {e}")))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::ParserError(format!("Failed to parse yaml inputs: {e}")))
    }

    pub fn add_point(&mut self, prediction: ClassLabel, reference: ClassLabel) {
        self.predictions.push(prediction);
        self.references.push(reference);
    }

    /// Appends a batch. Lengths are not checked here; mismatches surface from `compute`.
    pub fn add_batch(&mut self, predictions: &[ClassLabel], references: &[ClassLabel]) {
        self.predictions.extend_from_slice(predictions);
        self.references.extend_from_slice(references);
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty() && self.references.is_empty()
    }
}
