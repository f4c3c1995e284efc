//! # lcpeak - HPLC Peak Reporting and LCM Export
//!
//! `lcpeak` turns a chromatography sample (its peaks, instrument conditions
//! and acquisition details) into two artifacts: a paginated PDF analysis
//! report and an LCM binary file for downstream instrument software.
//!
//! ## Key Features
//!
//! - **Layered Configuration**: System defaults, department and user
//!   overrides merge into one [`config::Configuration`], which is frozen into
//!   every new sample so later admin changes never alter existing output.
//!
//! - **Peak Metrics**: USP plate count and tailing, resolution, percent area,
//!   peak capacity and concentration, all total functions that never fail on
//!   degenerate input.
//!
//! - **LCM Files**: Fixed-layout little-endian encoding with a synthesized
//!   Gaussian detector trace, a decoder and a structural validator.
//!
//! - **PDF Reports**: A pure layout pass (axes, curves, peak table, text
//!   blocks) followed by a renderer that draws onto any
//!   [`render::DrawSurface`], with `lopdf` as the production backend.
//!
//! ## Quick Start
//!
//! ```rust
//! use lcpeak::prelude::*;
//!
//! let config = Configuration::default();
//! let sample = SampleBuilder::new("Caffeine std")
//!     .sample_id("SAMPLE_1")
//!     .add_peak(Peak::new(2.345, 1_245_678.0, 89_234.0).with_name("Caffeine"))
//!     .add_peak(Peak::new(4.567, 876_543.0, 65_432.0))
//!     .build(&config)?;
//!
//! // LCM bytes with download name and content type
//! let lcm = lcm_artifact(&sample)?;
//! assert_eq!(lcm.filename, "SAMPLE_1.lcm");
//!
//! // PDF report rendered with the sample's frozen configuration
//! let report = report_artifact(&sample, &RenderOptions::default())?;
//! assert!(report.bytes.starts_with(b"%PDF"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration levels and their merge
//! - [`model`]: Samples, peaks and their validation
//! - [`metrics`]: Chromatographic quality figures
//! - [`lcm`]: LCM encoder, decoder and trace synthesis
//! - [`validator`]: Integrity checks for LCM files
//! - [`layout`]: Report geometry and text, independent of drawing
//! - [`render`]: Report pagination and drawing surfaces
//! - [`export`]: Artifact entry points

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod export;
pub mod layout;
pub mod lcm;
pub mod metrics;
pub mod model;
pub mod render;
pub mod validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        resolve_configuration, ConfigError, Configuration, ConfigurationOverrides, DetectorUnits,
    };
    pub use crate::export::{
        export, lcm_artifact, report_artifact, report_artifact_with, Artifact, ExportError,
    };
    pub use crate::layout::ReportLayout;
    pub use crate::lcm::{LcmError, LcmFile, LcmReader, LcmWriter};
    pub use crate::model::{
        ExportKind, InstrumentSettings, ModelError, Peak, ReportMetadata, Sample, SampleBuilder,
        SystemSuitability,
    };
    pub use crate::render::{render_report, RenderError, RenderOptions};
    pub use crate::validator::{validate_lcm, validate_lcm_file, ValidationReport};
}
