//! # Export Artifacts
//!
//! Entry points used by the collaborator layer: produce the bytes of an LCM
//! file or a PDF report together with the download filename and content
//! type, and optionally store them atomically in a directory.
//!
//! Report rendering uses the configuration frozen into the sample unless a
//! configuration is passed explicitly.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::Configuration;
use crate::lcm::{LcmError, LcmWriter};
use crate::model::{ExportKind, Sample};
use crate::render::{render_report, RenderError, RenderOptions};

/// Content type of LCM files
pub const LCM_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of reports
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

/// Errors that can occur while exporting a sample
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// LCM encoding failed
    #[error("LCM export failed: {0}")]
    LcmError(#[from] LcmError),

    /// Report rendering failed
    #[error("Report generation failed: {0}")]
    RenderError(#[from] RenderError),

    /// I/O error while storing an artifact
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Downloadable output of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File contents
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub content_type: &'static str,
}

impl Artifact {
    /// Store the artifact in `dir` under its filename.
    ///
    /// The bytes go to a temporary file in the same directory first, which
    /// is then renamed over the target.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// File stem derived from a sample id, safe for any file system
pub fn file_stem(sample_id: &str) -> String {
    let stem: String = sample_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "sample".to_string()
    } else {
        stem.to_string()
    }
}

/// LCM file for `sample`
pub fn lcm_artifact(sample: &Sample) -> Result<Artifact, ExportError> {
    let bytes = LcmWriter::new().encode(sample)?;
    Ok(Artifact {
        bytes,
        filename: format!("{}.lcm", file_stem(&sample.sample_id)),
        content_type: LCM_CONTENT_TYPE,
    })
}

/// PDF report for `sample` rendered with an explicit configuration
pub fn report_artifact_with(
    sample: &Sample,
    config: &Configuration,
    options: &RenderOptions,
) -> Result<Artifact, ExportError> {
    let bytes = render_report(sample, config, options)?;
    Ok(Artifact {
        bytes,
        filename: format!("{}.pdf", file_stem(&sample.sample_id)),
        content_type: REPORT_CONTENT_TYPE,
    })
}

/// PDF report for `sample` rendered with its frozen configuration
pub fn report_artifact(sample: &Sample, options: &RenderOptions) -> Result<Artifact, ExportError> {
    report_artifact_with(sample, &sample.department_config, options)
}

/// Produce an artifact and record the export on the sample when it succeeds
pub fn export(
    sample: &mut Sample,
    kind: ExportKind,
    options: &RenderOptions,
) -> Result<Artifact, ExportError> {
    let artifact = match kind {
        ExportKind::Lcm => lcm_artifact(sample)?,
        ExportKind::Report => report_artifact(sample, options)?,
    };
    sample.record_export(kind);
    Ok(artifact)
}
