//! # Report Layout Engine
//!
//! Pure computation of everything a report shows, before any drawing:
//! chromatogram axes and peak curves, the peak table, and the text blocks
//! around them.
//!
//! [`ReportLayout::compute`] takes the sample and the configuration to apply
//! (normally the sample's own frozen `department_config`) and returns a plain
//! descriptor. The same inputs always give the same layout; nothing here
//! reads the clock.
//!
//! ## Example
//!
//! ```rust
//! use lcpeak::config::Configuration;
//! use lcpeak::layout::ReportLayout;
//! use lcpeak::model::{Peak, SampleBuilder};
//!
//! let config = Configuration::default();
//! let sample = SampleBuilder::new("Blend A")
//!     .add_peak(Peak::new(2.1, 100.0, 10.0))
//!     .add_peak(Peak::new(4.2, 200.0, 20.0))
//!     .build(&config)?;
//!
//! let layout = ReportLayout::compute(&sample, &config);
//! let table = layout.table.expect("peak table enabled by default");
//! assert_eq!(table.rows.len(), 2);
//! # Ok::<(), lcpeak::model::ModelError>(())
//! ```

pub mod axis;
mod curves;
pub mod format;
mod info;
mod table;


pub use axis::{x_axis, x_axis_max, x_tick_step, y_axis, y_axis_max, y_ticks, Axis, Y_AXIS_LADDER};
pub use curves::{peak_curves, peak_label, PeakCurve, CURVE_HALF_WIDTH, CURVE_POINTS};
pub use info::{
    detector_label, sample_info, source_filename, suitability, InfoBlock, InfoField,
    DEFAULT_WAVELENGTH,
};
pub use table::{columns, Align, Column, PeakTable, TableColumn};

use crate::config::{Configuration, DetectorUnits};
use crate::model::Sample;

/// Chromatogram geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Chromatogram {
    /// Time axis in minutes
    pub x_axis: Axis,
    /// Signal axis in display units
    pub y_axis: Axis,
    /// Display units of the signal axis
    pub units: DetectorUnits,
    /// One curve per peak on the time axis
    pub curves: Vec<PeakCurve>,
}

impl Chromatogram {
    /// Axes and curves for a sample
    pub fn compute(sample: &Sample, config: &Configuration) -> Self {
        let units = config.detector_settings.default_units;
        let x_axis = x_axis(sample.metadata.run_time, sample.max_retention_time());
        let y_axis = y_axis(&sample.peaks, units);
        let curves = peak_curves(&sample.peaks, &x_axis, &y_axis, units);
        Self {
            x_axis,
            y_axis,
            units,
            curves,
        }
    }
}

/// Everything a report page shows, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    /// Report title
    pub title: String,
    /// Sample information block
    pub sample_info: InfoBlock,
    /// `Detector A <wavelength>nm`
    pub detector_label: String,
    /// Chromatogram, when the template includes the graph
    pub chromatogram: Option<Chromatogram>,
    /// Suitability lines, when the template includes them
    pub suitability: Option<Vec<InfoField>>,
    /// Peak table, when the template includes it
    pub table: Option<PeakTable>,
    /// Footer fields under the page body
    pub footer: Vec<InfoField>,
    /// Source data filename printed in the footer
    pub source_filename: String,
}

impl ReportLayout {
    /// Lay out a report for `sample` using `config`
    pub fn compute(sample: &Sample, config: &Configuration) -> Self {
        let template = &config.report_template;
        let meta = &sample.metadata;

        let title = meta
            .report_title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| template.title.clone());

        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let footer = vec![
            InfoField {
                label: "Reported by User".to_string(),
                value: meta
                    .reported_by
                    .clone()
                    .unwrap_or_else(|| sample.analyst_name.clone()),
            },
            InfoField {
                label: "Project Name".to_string(),
                value: text(&meta.project_name),
            },
            InfoField {
                label: "Report Method".to_string(),
                value: title.clone(),
            },
            InfoField {
                label: "Report Method ID".to_string(),
                value: text(&meta.report_method_id),
            },
        ];

        Self {
            title,
            sample_info: sample_info(sample),
            detector_label: detector_label(sample, config),
            chromatogram: template
                .include_graph
                .then(|| Chromatogram::compute(sample, config)),
            suitability: template
                .include_system_suitability
                .then(|| suitability(sample)),
            table: template
                .include_peak_table
                .then(|| PeakTable::build(&sample.peaks, config)),
            footer,
            source_filename: source_filename(sample),
        }
    }

    /// Layout using the configuration frozen into the sample
    pub fn for_sample(sample: &Sample) -> Self {
        Self::compute(sample, &sample.department_config)
    }
}
