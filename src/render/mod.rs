//! # Report Renderer
//!
//! Turns a [`ReportLayout`](crate::layout::ReportLayout) into a paginated
//! A4 document through the [`DrawSurface`] trait.
//!
//! The pass is linear: header, sample information, chromatogram,
//! system suitability, peak table and the footer on every page. The peak
//! table continues on further pages (with its header row repeated) when it
//! does not fit. Any surface failure aborts the render and nothing is
//! returned.
//!
//! [`PdfSurface`] writes PDF through `lopdf`; [`DisplayList`] records the
//! drawing commands instead.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use lcpeak::config::Configuration;
//! use lcpeak::model::{Peak, SampleBuilder};
//! use lcpeak::render::{render_report, RenderOptions};
//!
//! let config = Configuration::default();
//! let sample = SampleBuilder::new("Blend A")
//!     .add_peak(Peak::new(2.1, 100.0, 10.0))
//!     .build(&config)?;
//!
//! let options = RenderOptions::printed_at(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
//! let pdf = render_report(&sample, &config, &options)?;
//! assert!(pdf.starts_with(b"%PDF-1.5"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod display_list;
mod error;
mod pdf;
mod renderer;
mod surface;

#[cfg(test)]
mod tests;

pub use display_list::{DisplayList, DrawCommand};
pub use error::RenderError;
pub use pdf::{PdfSurface, PAGE_SIZE_PT};
pub use renderer::{
    PagePlan, RenderOptions, ReportRenderer, TableChunk, MARGIN, PAGE_HEIGHT, PAGE_WIDTH,
};
pub use surface::{text_width, DrawSurface, Font, MM_PER_PT};

use log::info;

use crate::config::Configuration;
use crate::layout::ReportLayout;
use crate::model::Sample;

/// Render `sample` with `config` onto any surface
pub fn render_with<S: DrawSurface>(
    sample: &Sample,
    config: &Configuration,
    options: &RenderOptions,
    surface: S,
) -> Result<S::Output, RenderError> {
    sample.validate()?;
    let layout = ReportLayout::compute(sample, config);
    ReportRenderer::new(&layout, options).render(surface)
}

/// Render `sample` with `config` to PDF bytes
pub fn render_report(
    sample: &Sample,
    config: &Configuration,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let surface = PdfSurface::new().with_producer(options.software.clone());
    let bytes = render_with(sample, config, options, surface)?;
    info!(
        "Rendered report for {} ({} peaks, {} bytes)",
        sample.sample_id,
        sample.peaks.len(),
        bytes.len()
    );
    Ok(bytes)
}
