use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use ou_cli::config::{FileConfig, Settings, SeverityLevel};
use ou_cli::runner;
use std::path::{Path, PathBuf};

/// Finds OpenAPI endpoints that a TypeScript codebase never calls
#[derive(Parser, Debug)]
#[command(name = "openapi-usage", version, about)]
struct Cli {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(short, long)]
    openapi: Option<PathBuf>,

    /// Root of the TypeScript source tree to scan
    #[arg(short, long)]
    src: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Exit non-zero when unused endpoints are found
    #[arg(long)]
    check: bool,

    /// Severity of unused endpoints in check mode
    #[arg(long, value_enum)]
    level: Option<SeverityLevel>,

    /// Explicit config file path (otherwise openapi-usage.yaml and friends
    /// are probed in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = ou_core::logging::init_from_args(None, cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    match execute(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::discover(Path::new("."))?,
    };

    let settings = merge(cli, file_config)?;
    let result = runner::run(&settings)?;
    Ok(result.exit_code)
}

/// Command-line arguments win over the config file
fn merge(cli: Cli, file: FileConfig) -> Result<Settings> {
    let openapi = cli
        .openapi
        .or(file.openapi.map(PathBuf::from))
        .context("No OpenAPI document given (use --openapi or a config file)")?;

    let src = cli
        .src
        .or(file.src.map(PathBuf::from))
        .context("No source directory given (use --src or a config file)")?;

    Ok(Settings {
        openapi,
        src,
        output: cli.output.or(file.output.map(PathBuf::from)),
        check: cli.check,
        level: cli.level.or(file.level).unwrap_or(SeverityLevel::Error),
        ignore: file.ignore.unwrap_or_default(),
    })
}
