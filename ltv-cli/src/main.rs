#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ltv_cli::{run, Commands, OutputFormat};
use ltv_common::logging::init_logging;
use ltv_common::Config;

/// `ltvboost` - LTV, P&L and ad spend calculators for online stores.
#[derive(Parser, Debug)]
#[command(name = "ltvboost")]
#[command(version)]
#[command(about = "Financial metrics and growth recommendations for e-commerce stores.", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (default: ~/.ltvboost/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_and_validate(cli.config.as_deref())?;

    init_logging(&config.observability.log_level, &config.observability.log_format);
    tracing::debug!(command = ?cli.command, "Running command");

    let rendered = run(&cli.command, &config, cli.format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
