use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use lcpeak::export::lcm_artifact;

use super::{load_sample, store_artifact};

/// Encode a sample record as an LCM file
pub fn run(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let sample = load_sample(&input)?;
    info!("Encoding LCM for {} ({} peaks)", sample.sample_id, sample.peaks.len());

    let artifact = lcm_artifact(&sample).context("LCM export failed")?;
    let path = store_artifact(&artifact, output, &input)?;

    println!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    Ok(())
}
