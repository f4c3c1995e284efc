//! # LCM Validation Module
//!
//! Integrity checks for `.lcm` files written by this crate or by other
//! tools. Unlike [`LcmReader`](crate::lcm::LcmReader), which stops at the
//! first problem, validation records every finding in a
//! [`ValidationReport`]. Each check belongs to a [`Section`] of the file and
//! carries the byte offset of the offending field when there is one; a file
//! that decodes also gets an [`LcmSummary`] of its header and sizes.
//!
//! ## Validation Checklist
//!
//! 1. **Structure Check**: signature, version, section sizes and footer
//! 2. **Data Sanity**: peak numbering, measurement ranges, stored
//!    placeholders and trace consistency
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lcpeak::validator::validate_lcm_file;
//! use std::path::Path;
//!
//! let report = validate_lcm_file(Path::new("SAMPLE_1.lcm"))?;
//! println!("{}", report);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;

use anyhow::{Context, Result};

pub use report::{
    CheckCounts, CheckStatus, LcmSummary, Section, ValidationCheck, ValidationReport,
};

mod data;
mod report;
mod structure;

#[cfg(test)]
mod tests;

/// Validate LCM bytes; `label` names the source in the report
pub fn validate_lcm(data: &[u8], label: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(label);

    // 1. Structure Check
    if let Some(end) = structure::check_structure(data, &mut report) {
        // 2. Data Sanity Check
        data::check_data_sanity(&data[..end], &mut report);
    }

    report
}

/// Read and validate an LCM file
pub fn validate_lcm_file(path: &Path) -> Result<ValidationReport> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(validate_lcm(&data, path.display().to_string()))
}
