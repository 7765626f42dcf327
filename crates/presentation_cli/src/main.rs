//! MapAssist CLI
//!
//! Command-line entry point for the map tools: list the tool definitions,
//! run a single tool call, or run a batch of calls concurrently.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use application::{DEFAULT_MAX_IN_FLIGHT, ToolCall, ToolDispatcher};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, bootstrap_subscriber, build_dispatcher, init_telemetry};
use serde_json::Value;
use tracing::debug;

/// MapAssist CLI
#[derive(Debug, Parser)]
#[command(name = "mapassist-cli")]
#[command(author, version, about = "Geocoding and routing tools for LLM agents", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "MAPASSIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the tool definitions as JSON
    Tools {
        /// Wrap each definition in the OpenAI function-calling envelope
        #[arg(long)]
        openai: bool,
    },

    /// Run a single tool call
    ///
    /// Example: mapassist-cli call osm_forward_geocode --args '{"query":"Eiffel Tower"}'
    Call {
        /// Tool name, e.g. `ors_route`
        tool: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Run the calls listed in a JSON file
    ///
    /// The file holds an array of `{"name": "...", "arguments": {...}}`.
    /// Outcomes are printed in input order.
    Batch {
        /// Path to the batch file
        file: PathBuf,

        /// Maximum number of calls in flight
        #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
        max_in_flight: usize,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse the `--args` value; it must be a JSON object
fn parse_arguments(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--args is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "--args must be a JSON object");
    Ok(value)
}

/// Parse a batch file body
fn parse_batch(body: &str) -> anyhow::Result<Vec<ToolCall>> {
    serde_json::from_str(body)
        .context("batch file must be a JSON array of {\"name\", \"arguments\"} objects")
}

fn load_config(path: Option<&Path>, verbose: u8) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_from(path).context("failed to load configuration")?;
    if verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(verbose).to_string();
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

async fn run(command: Commands, dispatcher: &ToolDispatcher) -> anyhow::Result<bool> {
    match command {
        Commands::Tools { openai } => {
            let definitions = dispatcher.list_tool_definitions();
            let json = if openai {
                Value::Array(
                    definitions
                        .iter()
                        .map(application::ToolDefinition::to_function_json)
                        .collect(),
                )
            } else {
                serde_json::to_value(definitions)?
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(true)
        },

        Commands::Call { tool, args } => {
            let arguments = parse_arguments(&args)?;
            let result = dispatcher.execute(&tool, arguments).await;
            let ok = result.is_ok();
            let json = match result {
                Ok(result) => serde_json::to_value(result)?,
                Err(envelope) => envelope.to_json(),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(ok)
        },

        Commands::Batch {
            file,
            max_in_flight,
        } => {
            let body = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let calls = parse_batch(&body)?;
            debug!(calls = calls.len(), max_in_flight, "Running batch");

            let outcomes = dispatcher.execute_batch(calls, max_in_flight).await;
            let ok = outcomes.iter().all(application::ToolOutcome::is_ok);
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
            Ok(ok)
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The global subscriber depends on the loaded config; log the loading itself
    // through a scoped one driven by `-v`
    let config = tracing::subscriber::with_default(
        bootstrap_subscriber(log_filter_from_verbosity(cli.verbose)),
        || load_config(cli.config.as_deref(), cli.verbose),
    )?;
    init_telemetry(&config.telemetry)?;
    debug!(config = ?cli.config, "Configuration source");

    let dispatcher = build_dispatcher(&config)?;

    if !run(cli.command, &dispatcher).await? {
        std::process::exit(1);
    }

    Ok(())
}
