use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use datscan::model::MeasurementSet;
use datscan::parser::DatFileParser;

mod config;
mod export;
mod info;
mod segments;

pub use config::Config;

/// datscan - inspect .dat measurement files and find stable segments
#[derive(Parser)]
#[command(name = "datscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load parser and matching settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Matching flags shared by `segments` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// Column to scan (defaults to the measurement's filter column)
    #[arg(long)]
    column: Option<String>,

    /// Target mean; auto-detect clusters when omitted
    #[arg(long, allow_negative_numbers = true)]
    mean: Option<f64>,

    /// Tolerance around the mean (half-width of a cluster in auto-detect mode)
    #[arg(short = 't', long)]
    tolerance: Option<f64>,

    /// Minimum number of continuous rows in a segment
    #[arg(short = 'n', long)]
    min_rows: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header metadata and columns of a .dat file
    Info {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Find stable segments in a column
    Segments {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        matching: MatchArgs,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export detected segments to CSV
    Export {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output CSV path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Columns to export (defaults to the X, Y and filter columns)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        #[command(flatten)]
        matching: MatchArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Info { file } => info::run(&file, &config),
        Commands::Segments {
            file,
            matching,
            json,
        } => segments::run(&file, &config, &matching, json),
        Commands::Export {
            file,
            output,
            columns,
            matching,
        } => export::run(&file, &output, &columns, &config, &matching),
    }
}

/// Parse `file` with the configured parser settings
fn load(file: &Path, config: &Config) -> Result<MeasurementSet> {
    DatFileParser::new(config.parser.clone())
        .parse(file)
        .with_context(|| format!("Failed to parse {}", file.display()))
}

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    console::style(text).bold().cyan().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}
