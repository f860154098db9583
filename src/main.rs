//! # datscan
//!
//! Command-line front end for the `datscan` library.
//!
//! ## Usage
//!
//! ```bash
//! # Show header metadata and columns
//! datscan info HeatCapacity.dat
//!
//! # Auto-detect stable clusters in the default filter column
//! datscan segments HeatCapacity.dat
//!
//! # Runs of at least 10 rows within 0.5 K of 300 K, as JSON
//! datscan segments Resistivity.dat --column "Temperature (K)" --mean 300 -t 0.5 -n 10 --json
//!
//! # Export the segments' X/Y/filter columns side by side
//! datscan export HeatCapacity.dat segments.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
