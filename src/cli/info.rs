use anyhow::{Context, Result};
use std::path::PathBuf;

use lcpeak::lcm::LcmReader;

/// Display the contents of an LCM file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let data = std::fs::read(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let lcm = LcmReader::new()
        .read(&data)
        .with_context(|| format!("Failed to decode LCM file: {}", file.display()))?;

    println!("LCM File Information");
    println!("====================");
    println!("File: {} ({} bytes)", file.display(), data.len());
    println!();

    println!("Header:");
    println!("  Version: {}", lcm.version);
    println!("  Sample ID: {}", lcm.sample_id);
    println!("  Sample name: {}", lcm.sample_name);
    match lcm.analysis_date() {
        Some(date) => println!("  Analysis date: {}", date.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Analysis date: <invalid>"),
    }
    println!("  Peaks: {}", lcm.peaks.len());
    println!();

    if !lcm.peaks.is_empty() {
        println!("Peaks:");
        println!(
            "  {:>4}  {:>9}  {:>14}  {:>12}  {:>10}  Name",
            "#", "RT (min)", "Area", "Height", "Conc."
        );
        for peak in &lcm.peaks {
            println!(
                "  {:>4}  {:>9.3}  {:>14.2}  {:>12.2}  {:>10.3}  {}",
                peak.number,
                peak.retention_time,
                peak.area,
                peak.height,
                peak.concentration,
                peak.name
            );
        }
        println!();
    }

    println!("Trace:");
    println!("  Points: {}", lcm.trace.len());
    println!("  Time span: {:.3} min", lcm.trace.max_time);
    println!("  Max intensity: {:.1}", lcm.trace.max_intensity());

    Ok(())
}
