use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_default::DefaultFromSerde;

use crate::{
    error::{Error, Result},
    impl_default_metric_functions,
    metrics::{FeatureType, Features, Metric, MetricConfig, MetricInfo, MetricInputs},
    scoring::{precision_score, PrecisionParams, PrecisionScore, DEFAULT_POS_LABEL},
    types::{Average, ClassLabel, MetricOutput, MetricValue, ZeroDivision},
};

pub const PRECISION_DESCRIPTION: &str = "
Precision is the fraction of the true examples among the predicted examples. It can be computed with:
Precision = TP / (TP + FP)
TP: True positive
FP: False positive
";

pub const PRECISION_INPUTS_DESCRIPTION: &str = "
Args:
    predictions: Predicted labels, as returned by a model.
    references: Ground truth labels.
    labels: The set of labels to include when average != 'binary', and
        their order if average is 'none'. Labels present in the data can
        be excluded, for example to calculate a multiclass average ignoring
        a majority negative class, while labels not present in the data will
        result in 0 components in a macro average. By default, all labels in
        references and predictions are used in sorted order.
    pos_label: The class to report if average is 'binary'. Defaults to 1.
    average: Determines the type of averaging performed on the data.
        Defaults to 'binary'.
            binary: Only report results for the class specified by pos_label.
                This is applicable only if targets are binary.
            micro: Calculate metrics globally by counting the total true positives,
                false negatives and false positives.
            macro: Calculate metrics for each label, and find their unweighted mean.
                This does not take label imbalance into account.
            weighted: Calculate metrics for each label, and find their average
                weighted by support (the number of true instances for each label).
                This alters 'macro' to account for label imbalance.
            samples: Calculate metrics for each instance, and find their average
                (only meaningful for multilabel classification).
            none: Return the score of each label.
    sample_weight: Sample weights.
    zero_division: Value returned for labels with no predicted samples: 'warn'
        (0.0 and a warning), 0, 1 or 'nan'. Defaults to 'warn'.
Returns:
    precision: Precision score, or one score per label if average is 'none'.
";

pub const PRECISION_REFERENCE_URL: &str =
    "https://scikit-learn.org/stable/modules/generated/sklearn.metrics.precision_score.html";

fn default_pos_label() -> ClassLabel {
    DEFAULT_POS_LABEL
}

/// Keyword arguments accepted by the precision metric.
#[derive(Deserialize, Serialize, JsonSchema, DefaultFromSerde, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct PrecisionConfig {
    #[serde(default)]
    pub labels: Option<Vec<ClassLabel>>,
    #[serde(default = "default_pos_label")]
    pub pos_label: ClassLabel,
    #[serde(default)]
    pub average: Average,
    #[serde(default)]
    pub sample_weight: Option<Vec<f64>>,
    #[serde(default)]
    pub zero_division: ZeroDivision,
}

impl PrecisionConfig {
    pub fn with_labels(mut self, labels: Vec<ClassLabel>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_pos_label(mut self, pos_label: ClassLabel) -> Self {
        self.pos_label = pos_label;
        self
    }

    pub fn with_average(mut self, average: Average) -> Self {
        self.average = average;
        self
    }

    pub fn with_sample_weight(mut self, sample_weight: Vec<f64>) -> Self {
        self.sample_weight = Some(sample_weight);
        self
    }

    pub fn with_zero_division(mut self, zero_division: ZeroDivision) -> Self {
        self.zero_division = zero_division;
        self
    }
}

impl MetricConfig for PrecisionConfig {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn typename(&self) -> String {
        "precision".to_owned()
    }
}

impl From<PrecisionScore> for MetricValue {
    fn from(score: PrecisionScore) -> Self {
        match score {
            PrecisionScore::Averaged(v) => MetricValue::Float(v),
            PrecisionScore::PerLabel(scores) => MetricValue::PerLabel(scores),
        }
    }
}

#[derive(Default)]
pub struct PrecisionMetric;

impl PrecisionMetric {
    /// Forwards every argument to [`precision_score`], with `references` as the ground
    /// truth, and reports the result under `"precision"`. Errors from the scoring routine
    /// are returned unchanged.
    pub fn compute_precision(
        &self,
        predictions: &[ClassLabel],
        references: &[ClassLabel],
        config: &PrecisionConfig,
    ) -> Result<MetricOutput> {
        tracing::debug!(
            examples = predictions.len(),
            average = %config.average,
            pos_label = config.pos_label,
            "computing precision"
        );
        let params = PrecisionParams {
            labels: config.labels.as_deref(),
            pos_label: config.pos_label,
            average: config.average,
            sample_weight: config.sample_weight.as_deref(),
            zero_division: config.zero_division,
        };
        let score = precision_score(references, predictions, &params)?;
        Ok(MetricOutput::from([("precision".to_owned(), score.into())]))
    }
}

impl Metric for PrecisionMetric {
    impl_default_metric_functions!("precision", PrecisionConfig);

    fn info(&self) -> MetricInfo {
        MetricInfo {
            description: PRECISION_DESCRIPTION.to_owned(),
            inputs_description: PRECISION_INPUTS_DESCRIPTION.to_owned(),
            features: Features::new()
                .with_feature("predictions", FeatureType::Int)
                .with_feature("references", FeatureType::Int),
            reference_urls: vec![PRECISION_REFERENCE_URL.to_owned()],
        }
    }

    fn compute(&self, inputs: &MetricInputs, config: &dyn MetricConfig) -> Result<MetricOutput> {
        let config = config
            .as_any()
            .downcast_ref::<PrecisionConfig>()
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "precision cannot be computed with a {} config",
                    config.typename()
                ))
            })?;
        self.compute_precision(&inputs.predictions, &inputs.references, config)
    }
}
