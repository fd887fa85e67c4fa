use schemars::{
    gen::SchemaGenerator,
    schema::{RootSchema, Schema, SchemaObject},
    schema_for,
};

use crate::{evaluation::EvaluationConfig, metrics::Metric};

pub struct ConfigSchema {
    schema: RootSchema,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSchema {
    pub fn new() -> Self {
        let mut schema = schema_for!(EvaluationConfig);

        // Every registered metric adds one alternative to this list
        let mut any_metric_config = SchemaObject::default();
        any_metric_config.subschemas().one_of = Some(vec![]);

        schema.definitions.insert(
            "any_metric_config".to_owned(),
            Schema::Object(any_metric_config),
        );

        let any_metric_ref = SchemaObject {
            reference: Some("#/definitions/any_metric_config".to_owned()),
            ..Default::default()
        };
        schema.schema.subschemas().all_of = Some(vec![Schema::Object(any_metric_ref)]);

        Self { schema }
    }

    pub fn schema(&self) -> &RootSchema {
        &self.schema
    }

    pub fn add_metric(&mut self, metric: &dyn Metric) {
        let typename_constant = SchemaObject {
            const_value: Some(metric.typename().into()),
            ..Default::default()
        };

        let mut metric_config_schema = SchemaObject::default();
        metric_config_schema
            .object()
            .properties
            .insert("metric".to_owned(), Schema::Object(typename_constant));

        let metric_inner_schema = metric.get_config_schema();
        metric_config_schema.object().properties.insert(
            "config".to_owned(),
            Schema::Object(metric_inner_schema.schema),
        );
        metric_config_schema
            .object()
            .required
            .insert("metric".to_owned());

        self.schema
            .definitions
            .insert(metric.typename(), Schema::Object(metric_config_schema));

        if let Some(Schema::Object(any_metric_config)) =
            self.schema.definitions.get_mut("any_metric_config")
        {
            let new_metric_ref = SchemaObject {
                reference: Some(format!("#/definitions/{}", metric.typename())),
                ..Default::default()
            };
            any_metric_config
                .subschemas()
                .one_of
                .get_or_insert_with(Vec::new)
                .push(Schema::Object(new_metric_ref));
        }

        // Enum definitions are shared between metrics by name
        self.schema
            .definitions
            .extend(metric_inner_schema.definitions);
    }
}

pub(crate) fn gen_metric_config_schema(_gen: &mut SchemaGenerator) -> Schema {
    Schema::Bool(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PrecisionMetric;

    #[test]
    fn metric_configs_are_referenced_from_root() {
        let mut schema = ConfigSchema::new();
        schema.add_metric(&PrecisionMetric);

        let value = serde_json::to_value(schema.schema()).unwrap();
        assert_eq!(
            value["definitions"]["any_metric_config"]["oneOf"][0]["$ref"],
            "#/definitions/precision"
        );
        assert_eq!(
            value["definitions"]["precision"]["properties"]["metric"]["const"],
            "precision"
        );
        assert!(value["definitions"]["precision"]["properties"]["config"]["properties"]
            .get("posLabel")
            .is_some());
        assert!(value["definitions"].get("Average").is_some());
    }
}
