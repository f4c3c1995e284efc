use serde::{Deserialize, Serialize};

use super::ModelError;

/// One detected chromatographic peak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peak {
    /// Retention time in minutes
    pub retention_time: f64,

    /// Integrated detector signal
    pub area: f64,

    /// Detector signal at the apex
    pub height: f64,

    /// Operator-entered concentration; authoritative over any estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<f64>,

    /// Unit of `concentration`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration_unit: Option<String>,

    /// Compound name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_name: Option<String>,

    /// Integration mark (e.g. "V", "S")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,

    /// Peak width at baseline in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Peak width at half height in minutes
    #[serde(default, rename = "widthAt50", skip_serializing_if = "Option::is_none")]
    pub width_at_50: Option<f64>,

    /// Peak width at 5 % height in minutes
    #[serde(default, rename = "widthAt5", skip_serializing_if = "Option::is_none")]
    pub width_at_5: Option<f64>,

    /// Distance from the leading edge to the apex at 5 % height
    #[serde(default, rename = "frontWidthAt5", skip_serializing_if = "Option::is_none")]
    pub front_width_at_5: Option<f64>,

    /// Share of the total area, derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_area: Option<f64>,

    /// USP theoretical plates, derived
    #[serde(default, rename = "uspPlateCount", skip_serializing_if = "Option::is_none")]
    pub usp_plate_count: Option<f64>,

    /// USP tailing factor, derived
    #[serde(default, rename = "uspTailing", skip_serializing_if = "Option::is_none")]
    pub usp_tailing: Option<f64>,
}

impl Peak {
    /// Create a peak from its three required measurements
    pub fn new(retention_time: f64, area: f64, height: f64) -> Self {
        Self {
            retention_time,
            area,
            height,
            concentration: None,
            concentration_unit: None,
            peak_name: None,
            mark: None,
            width: None,
            width_at_50: None,
            width_at_5: None,
            front_width_at_5: None,
            percent_area: None,
            usp_plate_count: None,
            usp_tailing: None,
        }
    }

    /// Set the compound name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.peak_name = Some(name.into());
        self
    }

    /// Set an authoritative concentration and its unit
    pub fn with_concentration(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.concentration = Some(value);
        self.concentration_unit = Some(unit.into());
        self
    }

    /// Set the integration mark
    pub fn with_mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    /// Set the baseline width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Replace the area and drop values derived from it
    pub fn set_area(&mut self, area: f64) {
        self.area = area;
        self.clear_derived();
    }

    /// Replace the height and drop values derived from it
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.clear_derived();
    }

    /// Forget all derived metrics
    pub fn clear_derived(&mut self) {
        self.percent_area = None;
        self.usp_plate_count = None;
        self.usp_tailing = None;
    }

    /// Whether every derived metric is present
    pub fn has_derived(&self) -> bool {
        self.percent_area.is_some() && self.usp_plate_count.is_some() && self.usp_tailing.is_some()
    }

    /// Display name, falling back to `Peak_<number>`
    pub fn name_or_default(&self, number: usize) -> String {
        match self.peak_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Peak_{}", number),
        }
    }

    /// Check the required measurements; `number` is the 1-based position
    pub fn validate(&self, number: usize) -> Result<(), ModelError> {
        if !self.retention_time.is_finite() || self.retention_time <= 0.0 {
            return Err(ModelError::InvalidRetentionTime {
                number,
                value: self.retention_time,
            });
        }
        for (field, value) in [("area", self.area), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidMeasurement {
                    number,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}
