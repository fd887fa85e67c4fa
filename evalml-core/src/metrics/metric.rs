use std::any::Any;

use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};

use crate::{error::Result, metrics::Features, metrics::MetricInputs, types::MetricOutput};

/// Static description of a metric, used by harness help and introspection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricInfo {
    pub description: String,
    /// Documentation of the inputs and keyword arguments accepted by `compute`.
    pub inputs_description: String,
    pub features: Features,
    pub reference_urls: Vec<String>,
}

pub trait MetricConfig: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn typename(&self) -> String;
}

/// A metric that can be loaded and driven by an evaluation harness.
///
/// Implementations are stateless: `compute` may be called concurrently and repeatedly with
/// the same arguments and must return the same output.
pub trait Metric: Send + Sync {
    fn typename(&self) -> String;
    fn info(&self) -> MetricInfo;
    fn parse_config(&self, value: &serde_json::Value) -> Result<Box<dyn MetricConfig>>;
    fn compute(&self, inputs: &MetricInputs, config: &dyn MetricConfig) -> Result<MetricOutput>;
    fn get_config_schema(&self) -> RootSchema;
    fn get_config_default(&self) -> serde_json::Value;
}

#[macro_export]
macro_rules! impl_default_metric_functions {
    ($typename: expr, $config_type: ident) => {
        fn typename(&self) -> String {
            $typename.to_owned()
        }

        fn parse_config(
            &self,
            value: &serde_json::Value,
        ) -> $crate::error::Result<Box<dyn $crate::metrics::MetricConfig>> {
            let res: $config_type = serde_json::from_value(value.clone()).map_err(|e| {
                $crate::error::Error::InvalidConfiguration(format!(
                    "Failed to parse {} config: {e}",
                    $typename
                ))
            })?;
            Ok(Box::new(res))
        }

        fn get_config_schema(&self) -> schemars::schema::RootSchema {
            schemars::schema_for!($config_type)
        }

        fn get_config_default(&self) -> serde_json::Value {
            serde_json::to_value($config_type::default()).unwrap_or_default()
        }
    };
}
