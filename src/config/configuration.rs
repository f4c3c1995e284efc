use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Fully resolved display and field settings for a department or user.
///
/// A `Configuration` carries no optionality beyond the documented defaults:
/// partial settings are merged into one with [`super::resolve_configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Peak count limits used at data entry
    pub peak_config: PeakConfig,

    /// Peak table column visibility and labels
    pub field_config: FieldConfig,

    /// Detector defaults and chart units
    pub detector_settings: DetectorSettings,

    /// Report sections and title
    pub report_template: ReportTemplate,

    /// Concentration unit handling
    pub concentration_settings: ConcentrationSettings,
}

impl Configuration {
    /// System default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check internal consistency of the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.peak_config.validate()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Number of peaks an analyst may enter for one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeakConfig {
    /// Number of peak rows offered by default
    pub default_count: u32,
    /// Minimum number of peaks
    pub min_count: u32,
    /// Maximum number of peaks
    pub max_count: u32,
    /// Whether the min/max range is enforced
    pub enable_range: bool,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            default_count: 5,
            min_count: 1,
            max_count: 20,
            enable_range: true,
        }
    }
}

impl PeakConfig {
    /// Whether a sample with `count` peaks satisfies the configured range
    pub fn accepts(&self, count: usize) -> bool {
        if !self.enable_range {
            return true;
        }
        let count = count as u64;
        count >= u64::from(self.min_count) && count <= u64::from(self.max_count)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_count > self.max_count
            || self.default_count < self.min_count
            || self.default_count > self.max_count
        {
            return Err(ConfigError::InvalidPeakRange {
                min: self.min_count,
                default: self.default_count,
                max: self.max_count,
            });
        }
        Ok(())
    }
}

/// Visibility flags and labels for the optional peak table columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    /// Show the area column
    pub enable_area: bool,
    /// Show the height column
    pub enable_height: bool,
    /// Show the concentration column
    pub enable_concentration: bool,
    /// Show the percent area column
    pub enable_percent_area: bool,
    /// Show the USP plate count column
    #[serde(rename = "enableUSPPlateCount")]
    pub enable_usp_plate_count: bool,
    /// Show the USP tailing column
    #[serde(rename = "enableUSPTailing")]
    pub enable_usp_tailing: bool,
    /// Label of the area column
    pub area_label: String,
    /// Label of the height column
    pub height_label: String,
    /// Label of the concentration column
    pub concentration_label: String,
    /// Label of the percent area column
    pub percent_area_label: String,
    /// Label of the USP plate count column
    #[serde(rename = "uspPlateCountLabel")]
    pub usp_plate_count_label: String,
    /// Label of the USP tailing column
    #[serde(rename = "uspTailingLabel")]
    pub usp_tailing_label: String,
}

/// Default column labels
pub mod labels {
    /// Area column
    pub const AREA: &str = "Area";
    /// Height column
    pub const HEIGHT: &str = "Height";
    /// Concentration column
    pub const CONCENTRATION: &str = "Conc.";
    /// Percent area column
    pub const PERCENT_AREA: &str = "% Area";
    /// USP plate count column
    pub const USP_PLATE_COUNT: &str = "USP Plate Count";
    /// USP tailing column
    pub const USP_TAILING: &str = "USP Tailing";
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enable_area: true,
            enable_height: true,
            enable_concentration: true,
            enable_percent_area: true,
            enable_usp_plate_count: true,
            enable_usp_tailing: true,
            area_label: labels::AREA.to_string(),
            height_label: labels::HEIGHT.to_string(),
            concentration_label: labels::CONCENTRATION.to_string(),
            percent_area_label: labels::PERCENT_AREA.to_string(),
            usp_plate_count_label: labels::USP_PLATE_COUNT.to_string(),
            usp_tailing_label: labels::USP_TAILING.to_string(),
        }
    }
}

/// Signal units used on the chromatogram Y axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorUnits {
    /// Millivolts; raw heights are in microvolts
    #[default]
    #[serde(rename = "mV")]
    MilliVolts,
    /// Absorbance units; raw heights are in micro-AU
    #[serde(rename = "AU")]
    Absorbance,
}

impl DetectorUnits {
    /// Divisor converting a raw detector height into display units
    pub fn height_divisor(self) -> f64 {
        match self {
            DetectorUnits::MilliVolts => 1_000.0,
            DetectorUnits::Absorbance => 1_000_000.0,
        }
    }

    /// Axis label
    pub fn label(self) -> &'static str {
        match self {
            DetectorUnits::MilliVolts => "mV",
            DetectorUnits::Absorbance => "AU",
        }
    }
}

impl fmt::Display for DetectorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detector defaults shown on the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorSettings {
    /// Detection wavelength in nm
    pub wavelength: Option<f64>,
    /// Flow rate in mL/min
    pub flow_rate: Option<f64>,
    /// Column temperature in Celsius
    pub temperature: Option<f64>,
    /// Units for the chromatogram Y axis
    pub default_units: DetectorUnits,
}

/// Report title and section switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportTemplate {
    /// Report title printed in the header
    pub title: String,
    /// Print the system suitability block
    pub include_system_suitability: bool,
    /// Print the peak table
    pub include_peak_table: bool,
    /// Print the chromatogram
    pub include_graph: bool,
    /// Add the Mark column to the peak table
    pub show_mark_column: bool,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self {
            title: "HPLC Analysis Report".to_string(),
            include_system_suitability: true,
            include_peak_table: true,
            include_graph: true,
            show_mark_column: true,
        }
    }
}

/// Concentration unit handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcentrationSettings {
    /// Unit used when a peak does not carry its own
    pub default_unit: String,
    /// Units offered at data entry
    pub available_units: Vec<String>,
    /// Add the Unit column next to the concentration column
    pub show_unit_column: bool,
}

impl Default for ConcentrationSettings {
    fn default() -> Self {
        Self {
            default_unit: "mg/L".to_string(),
            available_units: ["mg/L", "µg/mL", "ppm", "%"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            show_unit_column: true,
        }
    }
}
