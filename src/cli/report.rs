use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use lcpeak::export::report_artifact_with;

use super::config::Config;
use super::{load_sample, store_artifact};

/// Render the PDF report of a sample record
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    live_config: bool,
) -> Result<()> {
    if live_config && config.is_none() {
        anyhow::bail!("--live-config requires --config");
    }

    let sample = load_sample(&input)?;

    let lab = match &config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let configuration = if live_config {
        info!("Using live configuration from the lab file");
        lab.configuration()?
    } else {
        sample.department_config.clone()
    };
    let options = lab.render_options();

    let artifact = report_artifact_with(&sample, &configuration, &options)
        .context("Report generation failed")?;
    let path = store_artifact(&artifact, output, &input)?;

    println!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    Ok(())
}
