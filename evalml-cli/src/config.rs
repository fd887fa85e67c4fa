use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use evalml_core::{evaluation::Evaluation, metrics::get_metric};
use serde_json::json;

use crate::{command::Command, input::is_yaml};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

#[derive(Args)]
pub(crate) struct ConfigCheckArgs {
    config: String,
}

#[derive(Args)]
pub(crate) struct ConfigNewArgs {
    metric: String,

    #[arg(long, default_value = "json")]
    format: ConfigFormat,
}

#[derive(Subcommand)]
enum ConfigSubCommand {
    /// Check an evaluation configuration for validity, including keyword type checking.
    Check(ConfigCheckArgs),
    /// Emit a full evaluation configuration with all defaults.
    New(ConfigNewArgs),
}

#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubCommand,
}

pub(crate) struct ConfigCommand;

impl Command for ConfigCommand {
    type Args = ConfigArgs;
    fn execute(args: &ConfigArgs, _quiet: bool) -> Result<()> {
        match &args.subcommand {
            ConfigSubCommand::Check(args) => {
                let contents = std::fs::read_to_string(&args.config).with_context(|| {
                    format!("Failed to read configuration file {}", args.config)
                })?;
                let evaluation = if is_yaml(&args.config) {
                    Evaluation::create_from_yaml(&contents)
                } else {
                    Evaluation::create_from_json(&contents)
                };
                evaluation.with_context(|| {
                    format!("Failed to parse configuration file {}", args.config)
                })?;
                println!("ok");
                Ok(())
            }
            ConfigSubCommand::New(args) => {
                let default_metric_config = get_metric(&args.metric)?.get_config_default();
                let overall_config = json!({
                    "metric": args.metric,
                    "config": default_metric_config
                });
                match args.format {
                    ConfigFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&overall_config)?)
                    }
                    ConfigFormat::Yaml => print!("{}", serde_yaml::to_string(&overall_config)?),
                }
                Ok(())
            }
        }
    }
}
