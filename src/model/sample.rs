use std::io::Read;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::metrics;

use super::{InstrumentSettings, ModelError, Peak, ReportMetadata, SystemSuitability};

/// Largest number of peaks a sample may carry (the LCM peak count is a u16)
pub const MAX_PEAKS: usize = u16::MAX as usize;

/// One chromatography run and everything needed to report it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Unique identifier
    pub sample_id: String,

    /// Human-readable sample name
    pub sample_name: String,

    /// Analyst who entered the data
    #[serde(default)]
    pub analyst_name: String,

    /// Department of the analyst
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Peaks in detection order; position i is peak number i + 1
    #[serde(default)]
    pub peaks: Vec<Peak>,

    /// Instrument conditions
    #[serde(default)]
    pub instrument_settings: InstrumentSettings,

    /// Operator-entered suitability results
    #[serde(default)]
    pub system_suitability: SystemSuitability,

    /// Acquisition and processing details
    #[serde(flatten)]
    pub metadata: ReportMetadata,

    /// Time of the analysis
    pub analysis_date: DateTime<Utc>,

    /// Configuration frozen when the sample was created
    #[serde(default)]
    pub department_config: Configuration,

    /// Set once a report has been produced
    #[serde(default)]
    pub report_generated: bool,

    /// Set once an LCM file has been produced
    #[serde(default)]
    pub lcm_generated: bool,
}

/// Kind of artifact produced from a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// PDF analysis report
    Report,
    /// LCM binary file
    Lcm,
}

impl Sample {
    /// Generate a new sample identifier of the form `SAMPLE_XXXXXXXXXXXXX`
    pub fn generate_id() -> String {
        let uuid = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        format!("SAMPLE_{}", &uuid[..13])
    }

    /// Check every peak and the sample-level invariants
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.sample_id.is_empty() {
            return Err(ModelError::EmptySampleId);
        }
        if self.peaks.len() > MAX_PEAKS {
            return Err(ModelError::TooManyPeaks {
                count: self.peaks.len(),
                max: MAX_PEAKS,
            });
        }
        for (index, peak) in self.peaks.iter().enumerate() {
            peak.validate(index + 1)?;
        }
        Ok(())
    }

    /// Compute derived metrics that are missing on any peak.
    ///
    /// Percent areas always cover the whole sequence, so they are recomputed
    /// for every peak as soon as one of them lacks a value.
    pub fn fill_derived(&mut self) {
        if self.peaks.iter().any(|p| p.percent_area.is_none()) {
            metrics::compute_percent_areas(&mut self.peaks);
        }
        let mut filled = 0usize;
        for peak in self.peaks.iter_mut() {
            if peak.usp_plate_count.is_none() || peak.usp_tailing.is_none() {
                metrics::derive_peak(peak);
                filled += 1;
            }
        }
        debug!(
            "Derived metrics for {} of {} peaks in sample {}",
            filled,
            self.peaks.len(),
            self.sample_id
        );
    }

    /// Replace the area of one peak and recompute the sequence.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update_peak_area(&mut self, index: usize, area: f64) -> bool {
        let Some(peak) = self.peaks.get_mut(index) else {
            return false;
        };
        peak.set_area(area);
        for peak in self.peaks.iter_mut() {
            peak.percent_area = None;
        }
        self.fill_derived();
        true
    }

    /// Largest retention time, if there are peaks
    pub fn max_retention_time(&self) -> Option<f64> {
        self.peaks
            .iter()
            .map(|p| p.retention_time)
            .fold(None, |acc, rt| Some(acc.map_or(rt, |m: f64| m.max(rt))))
    }

    /// Record a successful export
    pub fn record_export(&mut self, kind: ExportKind) {
        match kind {
            ExportKind::Report => self.report_generated = true,
            ExportKind::Lcm => self.lcm_generated = true,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Builder for new samples.
///
/// [`SampleBuilder::build`] freezes the configuration passed to it into the
/// sample; later changes to the live configuration do not reach the sample.
#[derive(Debug, Clone)]
pub struct SampleBuilder {
    sample_id: Option<String>,
    sample_name: String,
    analyst_name: String,
    department: Option<String>,
    peaks: Vec<Peak>,
    instrument_settings: InstrumentSettings,
    system_suitability: SystemSuitability,
    metadata: ReportMetadata,
    analysis_date: Option<DateTime<Utc>>,
}

impl SampleBuilder {
    /// Start a sample with the given name
    pub fn new(sample_name: impl Into<String>) -> Self {
        Self {
            sample_id: None,
            sample_name: sample_name.into(),
            analyst_name: String::new(),
            department: None,
            peaks: Vec::new(),
            instrument_settings: InstrumentSettings::default(),
            system_suitability: SystemSuitability::default(),
            metadata: ReportMetadata::default(),
            analysis_date: None,
        }
    }

    /// Use an externally assigned identifier
    pub fn sample_id(mut self, id: impl Into<String>) -> Self {
        self.sample_id = Some(id.into());
        self
    }

    /// Set the analyst
    pub fn analyst(mut self, name: impl Into<String>) -> Self {
        self.analyst_name = name.into();
        self
    }

    /// Set the department
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Append a peak
    pub fn add_peak(mut self, peak: Peak) -> Self {
        self.peaks.push(peak);
        self
    }

    /// Append several peaks
    pub fn peaks(mut self, peaks: impl IntoIterator<Item = Peak>) -> Self {
        self.peaks.extend(peaks);
        self
    }

    /// Set the instrument conditions
    pub fn instrument_settings(mut self, settings: InstrumentSettings) -> Self {
        self.instrument_settings = settings;
        self
    }

    /// Set operator-entered suitability results
    pub fn system_suitability(mut self, suitability: SystemSuitability) -> Self {
        self.system_suitability = suitability;
        self
    }

    /// Set report metadata
    pub fn metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the analysis date
    pub fn analysis_date(mut self, date: DateTime<Utc>) -> Self {
        self.analysis_date = Some(date);
        self
    }

    /// Validate, freeze `config` into the sample and fill derived metrics
    pub fn build(self, config: &Configuration) -> Result<Sample, ModelError> {
        let analysis_date = self
            .analysis_date
            .or(self.metadata.date_acquired)
            .unwrap_or_else(Utc::now);

        let mut sample = Sample {
            sample_id: self.sample_id.unwrap_or_else(Sample::generate_id),
            sample_name: self.sample_name,
            analyst_name: self.analyst_name,
            department: self.department,
            peaks: self.peaks,
            instrument_settings: self.instrument_settings,
            system_suitability: self.system_suitability,
            metadata: self.metadata,
            analysis_date,
            department_config: config.clone(),
            report_generated: false,
            lcm_generated: false,
        };
        sample.validate()?;
        sample.fill_derived();
        Ok(sample)
    }
}
