use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instrument conditions of the run, printed on the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentSettings {
    /// Column description
    pub column: Option<String>,

    /// Mobile phase description
    #[serde(alias = "mobile_phase")]
    pub mobile_phase: Option<String>,

    /// Flow rate in mL/min
    #[serde(alias = "flow_rate")]
    pub flow_rate: Option<f64>,

    /// Injection volume in uL
    #[serde(alias = "injection_volume")]
    pub injection_volume: Option<f64>,

    /// Detection wavelength in nm
    #[serde(alias = "detection_wavelength")]
    pub detection_wavelength: Option<f64>,

    /// Column temperature in Celsius
    pub temperature: Option<f64>,
}

/// Operator-entered system suitability results.
///
/// Values present here take precedence over the ones computed from peaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSuitability {
    /// Resolution between critical peaks
    pub resolution: Option<f64>,
    /// Column efficiency in theoretical plates
    pub efficiency: Option<f64>,
    /// Peak asymmetry / tailing
    pub asymmetry: Option<f64>,
    /// Injection repeatability as %RSD
    pub repeatability: Option<f64>,
}

impl SystemSuitability {
    /// Whether no value has been entered
    pub fn is_empty(&self) -> bool {
        self.resolution.is_none()
            && self.efficiency.is_none()
            && self.asymmetry.is_none()
            && self.repeatability.is_none()
    }
}

/// Acquisition and processing details shown in the report header blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ReportMetadata {
    pub project_name: Option<String>,
    pub report_title: Option<String>,
    pub report_method_id: Option<String>,
    pub reported_by: Option<String>,
    pub sample_set_name: Option<String>,
    pub sample_type: Option<String>,
    pub vial_number: Option<String>,
    pub level: Option<String>,
    pub date_acquired: Option<DateTime<Utc>>,
    pub acquired_by: Option<String>,
    pub date_processed: Option<DateTime<Utc>>,
    pub processed_by: Option<String>,
    pub data_filename: Option<String>,
    pub method_filename: Option<String>,
    pub batch_filename: Option<String>,
    pub acq_method_set: Option<String>,
    pub processing_method: Option<String>,
    pub channel_detector: Option<String>,
    /// Run length in minutes; fixes the chromatogram time axis when set
    pub run_time: Option<f64>,
    pub injection_number: Option<u32>,
}
