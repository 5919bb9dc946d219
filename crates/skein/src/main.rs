//! Skein CLI - structural relationships of a source file from the command line.
//!
//! `skein extract` parses one file and prints its relationships; `skein serve`
//! answers line-delimited JSON requests on stdin.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use skein::SkeinConfig;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::extract::Format;

/// Skein: single-file structural relationship extractor.
#[derive(Parser)]
#[command(name = "skein")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./skein.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract relationships from one source file
    Extract {
        /// Source file to analyze
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Answer line-delimited JSON requests on stdin
    Serve,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!(
                "{}: failed to get current directory: {e}",
                "error".red().bold()
            );
            return ExitCode::FAILURE;
        }
    };

    let result = SkeinConfig::discover(cli.config.as_deref(), &cwd).and_then(|config| {
        match cli.command {
            Commands::Extract {
                file,
                format,
                pretty,
            } => cli::extract::run(&file, format, pretty, config),
            Commands::Serve => cli::serve::run(config),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
