//! puml2png CLI - convert PlantUML files to PNG.
//!
//! Two modes:
//! - `--file <path>`: convert a single `.puml` file
//! - `--watch [dir]`: poll a directory and convert sources as they change

mod commands;
mod error;
mod output;
mod validate;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use puml2png_render::DEFAULT_SERVER_URL;
use puml2png_watch::DEFAULT_POLL_INTERVAL;

use error::CliError;
use output::Output;

/// Convert PlantUML (.puml) files to PNG via a PlantUML server.
#[derive(Parser)]
#[command(name = "puml2png", version, about)]
struct Cli {
    /// PlantUML file to convert (.puml extension required).
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Watch a directory and convert .puml files automatically
    /// (defaults to the current directory).
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    watch: Option<Option<PathBuf>>,

    /// PlantUML server URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Seconds between watch polls.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    interval: u64,

    /// Enable verbose output (per-file decision and conversion logs).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    // Watch mode takes priority when both flags are given
    if let Some(dir) = cli.watch {
        return commands::watch::execute(dir, &cli.server_url, cli.interval, output);
    }

    if let Some(file) = cli.file {
        return commands::convert::execute(&file, &cli.server_url, output);
    }

    Err(CliError::Validation(
        "nothing to do, use --file or --watch (--help for details)".to_owned(),
    ))
}
