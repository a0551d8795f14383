// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Roomscan CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use roomscan::cli::Reporter;
use roomscan::config::DEFAULT_CONFIG_FILE;
use roomscan::{ScanConfig, ScanError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomscan")]
#[command(about = "Extract room geometry and layout measurements from a 3D room scan", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    analyze: AnalyzeArgs,

    /// Verbose logging (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Default)]
struct AnalyzeArgs {
    /// Input mesh (.obj or .stl) [default: room/scans/room.obj]
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file [default: room/scan_analysis.json]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file [default: ./roomscan.toml when present]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip histograms, density map, slices and region samples
    #[arg(long)]
    no_detail: bool,

    /// Write the analysis without printing the report
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a scan (default when no subcommand is given)
    Analyze(AnalyzeArgs),

    /// Write the default configuration as TOML
    InitConfig {
        /// Destination file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = dispatch(cli) {
        Reporter::report_error(&err.to_string());
        let code = err.downcast_ref::<ScanError>().map_or(1, ScanError::exit_code);
        std::process::exit(code);
    }
}

/// Logs go to stderr so the report on stdout stays readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Analyze(args)) => analyze_command(&args),
        Some(Commands::InitConfig { path, force }) => init_config_command(&path, force),
        Some(Commands::Version) => {
            println!("Roomscan v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => analyze_command(&cli.analyze),
    }
}

fn analyze_command(args: &AnalyzeArgs) -> Result<()> {
    let mut config = ScanConfig::load(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if args.no_detail {
        config.detail.enabled = false;
    }

    tracing::info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        regions = config.regions.len(),
        detail = config.detail.enabled,
        "starting scan analysis"
    );

    if !args.quiet {
        Reporter::progress(&format!("Loading {}", config.input_path.display()));
    }

    let result = roomscan::run(&config)?;

    if args.quiet {
        return Ok(());
    }
    Reporter::report_analysis(&result, &config.output_path);

    let empty: Vec<&str> = result
        .regions
        .iter()
        .filter(|r| r.is_empty())
        .map(|r| r.name.as_str())
        .collect();
    if !empty.is_empty() {
        Reporter::report_warning(&format!(
            "no vertices matched: {} (check region thresholds)",
            empty.join(", ")
        ));
    }

    Ok(())
}

fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ScanConfig::default().save(path)?;
    Reporter::success(&format!("Default configuration written to {}", path.display()));
    Ok(())
}
