use anyhow::Result;
use clap::Args;
use evalml_core::metrics::METRIC_REGISTRY;
use owo_colors::OwoColorize;

use crate::command::Command;

#[derive(Args)]
pub(crate) struct ListArgs {}

pub(crate) struct ListCommand;

impl Command for ListCommand {
    type Args = ListArgs;
    fn execute(_args: &ListArgs, _quiet: bool) -> Result<()> {
        let registry = METRIC_REGISTRY.read();
        for metric in registry.iter() {
            let info = metric.info();
            let summary = info
                .description
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or_default()
                .to_owned();
            println!("{}  {}", metric.typename().bold(), summary);
        }
        Ok(())
    }
}
