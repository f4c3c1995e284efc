use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;

use lcpeak::validator::{validate_lcm_file, ValidationReport};

/// Check an LCM file and exit non-zero when it cannot be trusted
pub fn run(file: PathBuf, json: bool, strict: bool) -> Result<()> {
    info!("Validating {}", file.display());

    let report = validate_lcm_file(&file)?;
    if let Some(summary) = &report.summary {
        debug!(
            "Decoded {} with {} peaks and {} trace points",
            summary.sample_id, summary.peak_count, summary.trace_points
        );
    }

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    let rejected = report.has_failures() || (strict && report.has_warnings());
    if rejected {
        if let Some(failure) = report.first_failure() {
            match failure.offset {
                Some(offset) => eprintln!(
                    "{}: first failure in {} at byte {}",
                    file.display(),
                    failure.name,
                    offset
                ),
                None => eprintln!("{}: first failure in {}", file.display(), failure.name),
            }
        } else {
            eprintln!("{}: warnings rejected by --strict", file.display());
        }
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "colorized_output")]
fn print_report(report: &ValidationReport) {
    print!("{}", report.format_colored());
}

#[cfg(not(feature = "colorized_output"))]
fn print_report(report: &ValidationReport) {
    print!("{}", report);
}
