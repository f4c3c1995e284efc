//! Key/value blocks of the report

use crate::config::Configuration;
use crate::metrics;
use crate::model::Sample;

use super::format::{format_date, format_quantity};

/// Wavelength printed when neither the run nor the department sets one
pub const DEFAULT_WAVELENGTH: f64 = 254.0;

/// One `label: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    /// Field label
    pub label: String,
    /// Formatted value, possibly empty
    pub value: String,
}

impl InfoField {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Sample information shown in two columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock {
    /// Left column
    pub left: Vec<InfoField>,
    /// Right column
    pub right: Vec<InfoField>,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Vial number, `1` when not recorded
fn vial(sample: &Sample) -> String {
    sample
        .metadata
        .vial_number
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "1".to_string())
}

/// Injection number, 1 when not recorded
fn injection(sample: &Sample) -> u32 {
    sample.metadata.injection_number.unwrap_or(1)
}

/// Sample information block
pub fn sample_info(sample: &Sample) -> InfoBlock {
    let meta = &sample.metadata;
    let settings = &sample.instrument_settings;
    let analyst = sample.analyst_name.as_str();
    let or_analyst = |value: &Option<String>| {
        value
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| analyst.to_string())
    };

    let left = vec![
        InfoField::new("Sample Name", sample.sample_name.as_str()),
        InfoField::new("Sample ID", sample.sample_id.as_str()),
        InfoField::new(
            "Sample Type",
            meta.sample_type.clone().unwrap_or_else(|| "Unknown".to_string()),
        ),
        InfoField::new("Vial", vial(sample)),
        InfoField::new("Injection #", injection(sample).to_string()),
        InfoField::new("Injection Volume", format_quantity(settings.injection_volume, "uL")),
        InfoField::new("Run Time", format_quantity(meta.run_time, "Minutes")),
        InfoField::new(
            "Date Acquired",
            format_date(Some(meta.date_acquired.as_ref().unwrap_or(&sample.analysis_date))),
        ),
        InfoField::new("Date Processed", format_date(meta.date_processed.as_ref())),
        InfoField::new("Analyst", analyst),
    ];

    let right = vec![
        InfoField::new("Acquired By", or_analyst(&meta.acquired_by)),
        InfoField::new("Processed By", or_analyst(&meta.processed_by)),
        InfoField::new("Sample Set Name", text(&meta.sample_set_name)),
        InfoField::new("Acq. Method Set", text(&meta.acq_method_set)),
        InfoField::new("Processing Method", text(&meta.processing_method)),
        InfoField::new("Channel Name", text(&meta.channel_detector)),
        InfoField::new("Column", text(&settings.column)),
        InfoField::new("Mobile Phase", text(&settings.mobile_phase)),
        InfoField::new("Flow Rate", format_quantity(settings.flow_rate, "mL/min")),
        InfoField::new("Temperature", format_quantity(settings.temperature, "°C")),
    ];

    InfoBlock { left, right }
}

/// `Detector A <wavelength>nm`, preferring the run's own wavelength
pub fn detector_label(sample: &Sample, config: &Configuration) -> String {
    let wavelength = sample
        .instrument_settings
        .detection_wavelength
        .or(config.detector_settings.wavelength)
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(DEFAULT_WAVELENGTH);
    format!("Detector A {}nm", super::format::format_tick(wavelength))
}

/// `<sampleName> - <vial>-<injection> - <sampleId>.lcd`
pub fn source_filename(sample: &Sample) -> String {
    format!(
        "{} - {}-{} - {}.lcd",
        sample.sample_name,
        vial(sample),
        injection(sample),
        sample.sample_id
    )
}

/// System suitability lines.
///
/// Operator-entered values take precedence; missing ones are computed
/// from the peaks when possible.
pub fn suitability(sample: &Sample) -> Vec<InfoField> {
    let entered = &sample.system_suitability;
    let computed = metrics::system_suitability(&sample.peaks);

    let resolution = entered.resolution.or(computed.resolution);
    let efficiency = entered.efficiency.or(computed.efficiency);
    let asymmetry = entered.asymmetry.or(computed.asymmetry);

    let mut fields = vec![
        InfoField::new(
            "Resolution",
            resolution.map(|v| format!("{:.2}", v)).unwrap_or_default(),
        ),
        InfoField::new(
            "Efficiency (plates)",
            efficiency.map(|v| format!("{:.0}", v)).unwrap_or_default(),
        ),
        InfoField::new(
            "Asymmetry",
            asymmetry.map(|v| format!("{:.2}", v)).unwrap_or_default(),
        ),
        InfoField::new(
            "USP Tailing (max)",
            computed.tailing.map(|v| format!("{:.3}", v)).unwrap_or_default(),
        ),
    ];
    if let Some(rsd) = entered.repeatability {
        fields.push(InfoField::new("Repeatability (%RSD)", format!("{:.2}", rsd)));
    }
    if !sample.peaks.is_empty() {
        fields.push(InfoField::new(
            "Peak Capacity",
            format!("{:.0}", computed.peak_capacity),
        ));
    }
    fields
}
