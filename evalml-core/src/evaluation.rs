use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::{Error, Result},
    metrics::{get_metric, Metric, MetricConfig, MetricInputs},
    types::{ClassLabel, MetricOutput},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    _schema: Option<String>,
    metric: String,
    #[serde(default)]
    #[schemars(schema_with = "crate::config_schema::gen_metric_config_schema")]
    config: serde_json::Value,
}

impl EvaluationConfig {
    pub fn new(metric: &str, config: serde_json::Value) -> Self {
        EvaluationConfig {
            _schema: None,
            metric: metric.to_owned(),
            config,
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }
}

/// A configured metric plus the inputs collected for it so far.
pub struct Evaluation {
    metric: Arc<dyn Metric>,
    config: Box<dyn MetricConfig>,
    inputs: MetricInputs,
}

impl Evaluation {
    pub fn create_from_json(json: &str) -> Result<Evaluation> {
        let config: EvaluationConfig = serde_json::from_str(json).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse configuration: {e}"))
        })?;

        Self::new(config)
    }

    pub fn create_from_yaml(yaml: &str) -> Result<Evaluation> {
        let json_from_yaml = serde_yaml::from_str::<serde_json::Value>(yaml)
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to parse yaml: {e}")))?;
        let config: EvaluationConfig = serde_json::from_value(json_from_yaml).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse configuration: {e}"))
        })?;

        Self::new(config)
    }

    /// Evaluation of `metric` with all keyword arguments at their defaults.
    pub fn for_metric(metric: &str) -> Result<Evaluation> {
        Self::new(EvaluationConfig::new(metric, json!({})))
    }

    pub fn new(config: EvaluationConfig) -> Result<Evaluation> {
        let metric = get_metric(&config.metric)?;
        // A missing `config` section means every keyword takes its default.
        let metric_config = if config.config.is_null() {
            metric.parse_config(&json!({}))?
        } else {
            metric.parse_config(&config.config)?
        };

        tracing::debug!(metric = %config.metric, "created evaluation");

        Ok(Evaluation {
            metric,
            config: metric_config,
            inputs: MetricInputs::default(),
        })
    }

    pub fn metric(&self) -> &dyn Metric {
        self.metric.as_ref()
    }

    pub fn inputs(&self) -> &MetricInputs {
        &self.inputs
    }

    pub fn add_point(&mut self, prediction: ClassLabel, reference: ClassLabel) {
        self.inputs.add_point(prediction, reference);
    }

    pub fn add_batch(&mut self, predictions: &[ClassLabel], references: &[ClassLabel]) {
        self.inputs.add_batch(predictions, references);
    }

    pub fn add_inputs(&mut self, inputs: &MetricInputs) {
        self.inputs.add_batch(&inputs.predictions, &inputs.references);
    }

    /// Computes the metric over everything added so far. The buffered inputs are kept, so
    /// calling this again gives the same output.
    pub fn compute(&self) -> Result<MetricOutput> {
        self.metric.compute(&self.inputs, self.config.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::types::MetricValue;

    #[test]
    fn evaluation_from_json_config() {
        let mut evaluation = Evaluation::create_from_json(
            r#"{"metric": "precision", "config": {"average": "macro", "labels": [0, 1, 2]}}"#,
        )
        .unwrap();
        evaluation.add_batch(&[0, 2, 1, 0, 0, 1], &[0, 1, 2, 0, 1, 2]);

        let output = evaluation.compute().unwrap();
        assert_abs_diff_eq!(
            output["precision"].as_float().unwrap(),
            2.0 / 9.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn evaluation_from_yaml_config() {
        let mut evaluation = Evaluation::create_from_yaml(
            "metric: precision\nconfig:\n  average: none\n  zeroDivision: one\n",
        )
        .unwrap();
        evaluation.add_point(0, 0);
        evaluation.add_point(0, 1);

        let output = evaluation.compute().unwrap();
        assert_eq!(
            output["precision"],
            MetricValue::PerLabel(vec![(0, 0.5), (1, 1.0)])
        );
    }

    #[test]
    fn numeric_zero_division_in_config() {
        let mut evaluation = Evaluation::create_from_yaml(
            "metric: precision\nconfig:\n  average: macro\n  zeroDivision: 1\n",
        )
        .unwrap();
        // Label 2 is never predicted.
        evaluation.add_batch(&[0, 1, 1], &[0, 1, 2]);
        assert_abs_diff_eq!(
            evaluation.compute().unwrap()["precision"].as_float().unwrap(),
            (1.0 + 0.5 + 1.0) / 3.0,
            epsilon = 1e-12
        );

        let mut evaluation = Evaluation::create_from_yaml(
            "metric: precision\nconfig:\n  average: macro\n  zeroDivision: 0\n",
        )
        .unwrap();
        evaluation.add_batch(&[0, 1, 1], &[0, 1, 2]);
        assert_abs_diff_eq!(
            evaluation.compute().unwrap()["precision"].as_float().unwrap(),
            0.5,
            epsilon = 1e-12
        );

        let evaluation = Evaluation::create_from_json(
            r#"{"metric": "precision", "config": {"zeroDivision": 0}}"#,
        );
        assert!(evaluation.is_ok());
    }

    #[test]
    fn missing_config_section_uses_defaults() {
        let mut evaluation = Evaluation::create_from_json(r#"{"metric": "precision"}"#).unwrap();
        evaluation.add_batch(&[1, 1, 1, 1], &[1, 1, 1, 1]);
        assert_eq!(evaluation.compute().unwrap()["precision"], MetricValue::Float(1.0));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Evaluation::create_from_json(r#"{"metric": "precision", "extra": 1}"#);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let result = Evaluation::for_metric("bleu");
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn compute_is_repeatable() {
        let mut evaluation = Evaluation::for_metric("precision").unwrap();
        evaluation.add_batch(&[1, 0, 1, 1, 0], &[1, 1, 1, 0, 0]);
        assert_eq!(evaluation.compute().unwrap(), evaluation.compute().unwrap());
        assert_eq!(evaluation.inputs().len(), 5);
    }

    #[test]
    fn mismatched_batches_fail_on_compute() {
        let mut evaluation = Evaluation::for_metric("precision").unwrap();
        evaluation.add_batch(&[1, 0, 1, 1, 0], &[1, 1, 1, 0]);
        assert!(matches!(evaluation.compute(), Err(Error::ShapeMismatch(_))));
    }
}
