use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::command::Command;

mod command;
mod compute;
mod config;
mod describe;
mod gen_completions;
mod gen_schema;
mod input;
mod list;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only log errors
    #[arg(long, default_value = "false")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered metrics
    List(list::ListArgs),
    /// Show a metric's description, inputs and references
    Describe(describe::DescribeArgs),
    /// Compute a metric over predictions and references
    Compute(compute::ComputeArgs),
    /// Check or generate an evaluation config
    Config(config::ConfigArgs),
    /// Generate shell completions
    GenCompletions(gen_completions::GenCompletionsArgs),
    /// Generate JSON schema for evaluation configs
    GenSchema(gen_schema::GenSchemaArgs),
}

fn init_tracing(quiet: bool) {
    let default_directive = if quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    match &cli.command {
        Commands::List(args) => list::ListCommand::execute(args, cli.quiet),
        Commands::Describe(args) => describe::DescribeCommand::execute(args, cli.quiet),
        Commands::Compute(args) => compute::ComputeCommand::execute(args, cli.quiet),
        Commands::Config(args) => config::ConfigCommand::execute(args, cli.quiet),
        Commands::GenCompletions(args) => {
            gen_completions::GenCompletionsCommand::execute(args, cli.quiet)
        }
        Commands::GenSchema(args) => gen_schema::GenSchemaCommand::execute(args, cli.quiet),
    }
}
