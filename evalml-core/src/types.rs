use std::{collections::BTreeMap, str::FromStr};

use derive_more::{Display, TryInto};
use schemars::{
    gen::SchemaGenerator,
    schema::{Schema, SchemaObject},
    JsonSchema,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Integer class identifier, as declared by the `int` feature type.
pub type ClassLabel = i64;

/// How per-label scores are folded into a single score.
#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq, Eq, Clone, Copy, Default, Display)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Only report the score of `pos_label`. Requires binary targets.
    #[default]
    #[display(fmt = "binary")]
    Binary,
    /// Count true and false positives globally.
    #[display(fmt = "micro")]
    Micro,
    /// Unweighted mean of the per-label scores.
    #[display(fmt = "macro")]
    Macro,
    /// Mean of the per-label scores weighted by support.
    #[display(fmt = "weighted")]
    Weighted,
    /// Mean over instances. Only meaningful for multilabel targets.
    #[display(fmt = "samples")]
    Samples,
    /// No averaging, one score per label.
    #[display(fmt = "none")]
    None,
}

impl FromStr for Average {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(Average::Binary),
            "micro" => Ok(Average::Micro),
            "macro" => Ok(Average::Macro),
            "weighted" => Ok(Average::Weighted),
            "samples" => Ok(Average::Samples),
            "none" => Ok(Average::None),
            _ => Err(Error::InvalidAverageMode(format!(
                "average has to be one of [None, 'micro', 'macro', 'weighted', 'samples', 'binary'], got '{s}'"
            ))),
        }
    }
}

/// Value substituted when a label has no predicted samples.
///
/// Deserializes from its lowercase name, from `"0"`/`"1"`, or from the numbers `0` and `1`.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy, Default, Display)]
#[serde(rename_all = "lowercase")]
pub enum ZeroDivision {
    /// Acts as `zero` and logs a warning.
    #[default]
    #[display(fmt = "warn")]
    Warn,
    #[display(fmt = "zero")]
    Zero,
    #[display(fmt = "one")]
    One,
    #[display(fmt = "nan")]
    Nan,
}

impl ZeroDivision {
    pub fn value(&self) -> f64 {
        match self {
            ZeroDivision::Warn | ZeroDivision::Zero => 0.0,
            ZeroDivision::One => 1.0,
            ZeroDivision::Nan => f64::NAN,
        }
    }
}

impl FromStr for ZeroDivision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warn" => Ok(ZeroDivision::Warn),
            "zero" | "0" => Ok(ZeroDivision::Zero),
            "one" | "1" => Ok(ZeroDivision::One),
            "nan" => Ok(ZeroDivision::Nan),
            _ => Err(Error::InvalidArgument(format!(
                "zero_division has to be one of ['warn', 0, 1, 'nan'], got '{s}'"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ZeroDivision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Number(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
            Repr::Number(n) if n == 0.0 => Ok(ZeroDivision::Zero),
            Repr::Number(n) if n == 1.0 => Ok(ZeroDivision::One),
            Repr::Number(n) => Err(de::Error::custom(format!(
                "zero_division has to be one of ['warn', 0, 1, 'nan'], got {n}"
            ))),
        }
    }
}

impl JsonSchema for ZeroDivision {
    fn schema_name() -> String {
        "ZeroDivision".to_owned()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            enum_values: Some(vec![
                serde_json::json!("warn"),
                serde_json::json!("zero"),
                serde_json::json!("one"),
                serde_json::json!("nan"),
                serde_json::json!("0"),
                serde_json::json!("1"),
                serde_json::json!(0),
                serde_json::json!(1),
            ]),
            ..Default::default()
        }
        .into()
    }
}

/// A single metric result: either one score or one score per label.
#[derive(Debug, PartialEq, Clone, TryInto)]
pub enum MetricValue {
    Float(f64),
    PerLabel(Vec<(ClassLabel, f64)>),
}

impl MetricValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            MetricValue::PerLabel(_) => None,
        }
    }

    pub fn as_per_label(&self) -> Option<&[(ClassLabel, f64)]> {
        match self {
            MetricValue::Float(_) => None,
            MetricValue::PerLabel(v) => Some(v),
        }
    }
}

// Per-label scores serialize as an object keyed by label, in label order.
impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Float(v) => serializer.serialize_f64(*v),
            MetricValue::PerLabel(scores) => {
                serializer.collect_map(scores.iter().map(|(label, score)| (label, score)))
            }
        }
    }
}

pub type MetricOutput = BTreeMap<String, MetricValue>;
