mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use modplan_lib::consts::PROJECT_FILENAME;
use modplan_lib::{Configuration, Platform};
use tracing_subscriber::EnvFilter;

use crate::cmd::{PlanOptions, cmd_check, cmd_plan, cmd_targets};
use crate::output::OutputFormat;

/// modplan - module dependency and include-path planner
#[derive(Parser)]
#[command(name = "modplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the project descriptor file
  #[arg(short, long, global = true, env = "MODPLAN_PROJECT", default_value = PROJECT_FILENAME)]
  project: PathBuf,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve a target into a build plan
  Plan {
    /// Name of the target to resolve
    target: String,

    /// Force an editor build regardless of target type
    #[arg(long)]
    editor: bool,

    /// Platform to resolve for
    #[arg(long, default_value = "Win64")]
    platform: Platform,

    /// Build configuration to resolve for
    #[arg(long, default_value = "Development")]
    configuration: Configuration,

    /// Also write the plan as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Validate every declaration in the project
  Check,

  /// List declared targets
  Targets,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Plan {
      target,
      editor,
      platform,
      configuration,
      output,
    } => cmd_plan(
      &cli.project,
      &PlanOptions {
        target,
        editor,
        platform,
        configuration,
        output,
      },
      cli.format,
      cli.verbose,
    ),
    Commands::Check => cmd_check(&cli.project, cli.format),
    Commands::Targets => cmd_targets(&cli.project, cli.format),
  }
}
