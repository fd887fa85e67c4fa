use std::{collections::BTreeMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::{
    error::{Error, Result},
    metrics::{Metric, PrecisionMetric},
};

pub static METRIC_REGISTRY: Lazy<RwLock<MetricRegistry>> = Lazy::new(|| {
    let mut registry = MetricRegistry::default();
    registry.register(Arc::new(PrecisionMetric));
    RwLock::new(registry)
});

#[derive(Default)]
pub struct MetricRegistry {
    registry: BTreeMap<String, Arc<dyn Metric>>,
}

impl MetricRegistry {
    /// Registers `metric` under its typename, replacing any metric of the same name.
    pub fn register(&mut self, metric: Arc<dyn Metric>) {
        self.registry.insert(metric.typename(), metric);
    }

    pub fn get(&self, typename: &str) -> Option<Arc<dyn Metric>> {
        self.registry.get(typename).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Metric> {
        self.registry.values().map(|x| x.as_ref())
    }

    pub fn names(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }
}

pub fn get_metric(typename: &str) -> Result<Arc<dyn Metric>> {
    let registry = METRIC_REGISTRY.read();
    registry.get(typename).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "Unknown metric: {}. Available metrics are: {}",
            typename,
            registry.names().join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricConfig, MetricInfo, MetricInputs};
    use crate::types::{MetricOutput, MetricValue};

    struct CountMetric;

    impl Metric for CountMetric {
        fn typename(&self) -> String {
            "count".to_owned()
        }

        fn info(&self) -> MetricInfo {
            PrecisionMetric.info()
        }

        fn parse_config(&self, value: &serde_json::Value) -> Result<Box<dyn MetricConfig>> {
            PrecisionMetric.parse_config(value)
        }

        fn compute(&self, inputs: &MetricInputs, _config: &dyn MetricConfig) -> Result<MetricOutput> {
            Ok(MetricOutput::from([(
                "count".to_owned(),
                MetricValue::Float(inputs.len() as f64),
            )]))
        }

        fn get_config_schema(&self) -> schemars::schema::RootSchema {
            PrecisionMetric.get_config_schema()
        }

        fn get_config_default(&self) -> serde_json::Value {
            PrecisionMetric.get_config_default()
        }
    }

    #[test]
    fn precision_is_registered_by_default() {
        let metric = get_metric("precision").unwrap();
        assert_eq!(metric.typename(), "precision");
        assert!(METRIC_REGISTRY.read().names().contains(&"precision".to_owned()));
    }

    #[test]
    fn unknown_metric_lists_available_ones() {
        match get_metric("recall") {
            Err(Error::InvalidArgument(msg)) => {
                assert!(msg.starts_with("Unknown metric: recall."));
                assert!(msg.contains("precision"));
            }
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("recall should not be registered"),
        }
    }

    #[test]
    fn local_registry_accepts_new_metrics() {
        let mut registry = MetricRegistry::default();
        registry.register(Arc::new(CountMetric));
        registry.register(Arc::new(PrecisionMetric));
        assert_eq!(registry.names(), vec!["count".to_owned(), "precision".to_owned()]);

        let metric = registry.get("count").unwrap();
        let config = metric.parse_config(&serde_json::json!({})).unwrap();
        let output = metric
            .compute(&MetricInputs::new(vec![1, 2], vec![1, 2]), config.as_ref())
            .unwrap();
        assert_eq!(output["count"], MetricValue::Float(2.0));
    }
}
