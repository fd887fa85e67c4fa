use anyhow::{Context, Result};
use clap::{Args, ValueHint};
use evalml_core::{
    evaluation::{Evaluation, EvaluationConfig},
    metrics::MetricInputs,
    Average, MetricOutput, MetricValue, ZeroDivision,
};
use prettytable::{row, Table};
use serde_json::json;

use crate::{
    command::Command,
    input::{read_inputs, read_keywords},
};

#[derive(Args)]
pub(crate) struct ComputeArgs {
    /// Name of a registered metric
    #[arg(default_value = "precision")]
    metric: String,

    /// JSON or YAML file holding a {predictions, references} record
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    #[arg(conflicts_with_all = ["predictions", "references"])]
    #[arg(required_unless_present_all = ["predictions", "references"])]
    data: Option<String>,

    /// Comma separated predicted labels
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "references")]
    predictions: Option<Vec<i64>>,

    /// Comma separated ground truth labels
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "predictions")]
    references: Option<Vec<i64>>,

    /// JSON or YAML file holding the metric's keyword arguments
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<String>,

    /// binary, micro, macro, weighted, samples or none
    #[arg(long)]
    average: Option<Average>,

    #[arg(long, allow_hyphen_values = true)]
    pos_label: Option<i64>,

    /// Comma separated labels to include
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    labels: Option<Vec<i64>>,

    /// Comma separated per-example weights
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    sample_weight: Option<Vec<f64>>,

    /// warn, 0, 1 or nan
    #[arg(long)]
    zero_division: Option<ZeroDivision>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl ComputeArgs {
    /// Keyword arguments from the config file, overridden by command line flags.
    fn keywords(&self) -> Result<serde_json::Value> {
        let mut keywords = match &self.config {
            Some(path) => read_keywords(path)?,
            None => json!({}),
        };
        if let Some(map) = keywords.as_object_mut() {
            if let Some(average) = self.average {
                map.insert("average".to_owned(), json!(average));
            }
            if let Some(pos_label) = self.pos_label {
                map.insert("posLabel".to_owned(), json!(pos_label));
            }
            if let Some(labels) = &self.labels {
                map.insert("labels".to_owned(), json!(labels));
            }
            if let Some(sample_weight) = &self.sample_weight {
                map.insert("sampleWeight".to_owned(), json!(sample_weight));
            }
            if let Some(zero_division) = self.zero_division {
                map.insert("zeroDivision".to_owned(), json!(zero_division));
            }
        }
        Ok(keywords)
    }

    fn inputs(&self) -> Result<MetricInputs> {
        match (&self.data, &self.predictions, &self.references) {
            (Some(path), _, _) => read_inputs(path),
            (None, Some(predictions), Some(references)) => {
                Ok(MetricInputs::new(predictions.clone(), references.clone()))
            }
            _ => anyhow::bail!("Either --data or both --predictions and --references are required"),
        }
    }
}

fn print_table(output: &MetricOutput) {
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Label", "Value"]);
    for (name, value) in output {
        match value {
            MetricValue::Float(v) => {
                table.add_row(row![name, "", format!("{:.4}", v)]);
            }
            MetricValue::PerLabel(scores) => {
                for (label, v) in scores {
                    table.add_row(row![name, label, format!("{:.4}", v)]);
                }
            }
        }
    }
    table.printstd();
}

pub(crate) struct ComputeCommand;

impl Command for ComputeCommand {
    type Args = ComputeArgs;
    fn execute(args: &ComputeArgs, _quiet: bool) -> Result<()> {
        let keywords = args.keywords()?;
        let mut evaluation = Evaluation::new(EvaluationConfig::new(&args.metric, keywords))
            .with_context(|| format!("Failed to configure metric {}", args.metric))?;
        evaluation.add_inputs(&args.inputs()?);
        tracing::debug!(
            metric = %args.metric,
            examples = evaluation.inputs().len(),
            "loaded inputs"
        );

        let output = evaluation
            .compute()
            .with_context(|| format!("Failed to compute {}", args.metric))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_table(&output);
        }
        Ok(())
    }
}
