//! # lcpeak
//!
//! Command-line front end for HPLC sample exports.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a sample record as an LCM file
//! lcpeak lcm sample.json -o out/
//!
//! # Render the PDF report with the lab configuration
//! lcpeak report sample.json --config lab.toml
//!
//! # Inspect and check an LCM file
//! lcpeak info SAMPLE_1.lcm
//! lcpeak validate SAMPLE_1.lcm
//!
//! # Write a demo sample with its LCM file and report
//! lcpeak demo lcpeak_demo
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
