use anyhow::Result;
use clap::Args;
use evalml_core::{config_schema::ConfigSchema, metrics::METRIC_REGISTRY};

use crate::command::Command;

#[derive(Args)]
pub(crate) struct GenSchemaArgs {}

pub(crate) struct GenSchemaCommand;

impl Command for GenSchemaCommand {
    type Args = GenSchemaArgs;
    fn execute(_args: &GenSchemaArgs, _quiet: bool) -> Result<()> {
        let mut schema = ConfigSchema::new();
        METRIC_REGISTRY.read().iter().for_each(|x| {
            schema.add_metric(x);
        });
        println!("{}", serde_json::to_string_pretty(schema.schema())?);
        Ok(())
    }
}
