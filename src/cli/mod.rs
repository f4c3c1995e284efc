use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use lcpeak::export::Artifact;
use lcpeak::model::Sample;

mod config;
mod demo;
mod info;
mod lcm;
mod report;
mod validate;

/// lcpeak - HPLC peak reports and LCM exports
#[derive(Parser)]
#[command(name = "lcpeak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a sample record (JSON) as an LCM file
    Lcm {
        /// Sample record
        #[arg(value_name = "SAMPLE")]
        input: PathBuf,

        /// Output file or directory (defaults to the sample's directory)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Render the PDF analysis report of a sample record (JSON)
    Report {
        /// Sample record
        #[arg(value_name = "SAMPLE")]
        input: PathBuf,

        /// Output file or directory (defaults to the sample's directory)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Lab configuration file (TOML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Use the configuration file's department/user settings instead of
        /// the configuration frozen into the sample
        #[arg(long)]
        live_config: bool,
    },

    /// Display the contents of an LCM file
    Info {
        /// LCM file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate LCM file integrity
    Validate {
        /// LCM file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Write a demo sample record with its LCM file and report
    Demo {
        /// Output directory
        #[arg(value_name = "OUT_DIR", default_value = "lcpeak_demo")]
        output: PathBuf,
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
    match cli.command {
        Commands::Lcm { input, output } => lcm::run(input, output),
        Commands::Report {
            input,
            output,
            config,
            live_config,
        } => report::run(input, output, config, live_config),
        Commands::Info { file } => info::run(file),
        Commands::Validate { file, json, strict } => validate::run(file, json, strict),
        Commands::Demo { output } => demo::run(output),
    }
}

/// Read a sample record and recompute missing derived fields
pub(crate) fn load_sample(path: &Path) -> Result<Sample> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open sample record: {}", path.display()))?;
    let mut sample = Sample::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse sample record: {}", path.display()))?;
    sample
        .validate()
        .with_context(|| format!("Invalid sample record: {}", path.display()))?;
    sample.fill_derived();
    debug!("Loaded sample {} with {} peaks", sample.sample_id, sample.peaks.len());
    Ok(sample)
}

/// Write `bytes` to `path` through a temporary file in the same directory
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(bytes)?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Store an artifact at the requested output, or next to the input
pub(crate) fn store_artifact(artifact: &Artifact, output: Option<PathBuf>, input: &Path) -> Result<PathBuf> {
    let target = match output {
        Some(path) if path.is_dir() => path.join(&artifact.filename),
        Some(path) => path,
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&artifact.filename),
            _ => PathBuf::from(&artifact.filename),
        },
    };
    write_atomic(&target, &artifact.bytes)?;
    Ok(target)
}
