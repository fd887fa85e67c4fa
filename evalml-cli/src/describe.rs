use anyhow::{Context, Result};
use clap::Args;
use evalml_core::metrics::get_metric;
use owo_colors::OwoColorize;

use crate::command::Command;

#[derive(Args)]
pub(crate) struct DescribeArgs {
    /// Name of a registered metric
    metric: String,

    /// Print the metadata as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) struct DescribeCommand;

impl Command for DescribeCommand {
    type Args = DescribeArgs;
    fn execute(args: &DescribeArgs, _quiet: bool) -> Result<()> {
        let metric = get_metric(&args.metric)
            .with_context(|| format!("Failed to describe metric {}", args.metric))?;
        let info = metric.info();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }

        println!("{}", metric.typename().bold());
        println!("{}", info.description.trim_end());
        println!();
        println!("{}", "Features:".blue());
        for (name, feature_type) in info.features.iter() {
            println!("    {}: {}", name, feature_type);
        }
        println!("{}", info.inputs_description.trim_end());
        println!();
        println!("{}", "References:".blue());
        for url in &info.reference_urls {
            println!("    {}", url);
        }
        Ok(())
    }
}
