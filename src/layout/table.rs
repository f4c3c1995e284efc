//! Peak table columns and rows

use crate::config::{labels, Configuration};
use crate::metrics::{self, ConcentrationOptions};
use crate::model::Peak;

use super::format::format_scientific;

/// Columns a peak table can show, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// 1-based peak number
    PeakNumber,
    /// Retention time
    RetentionTime,
    /// Peak area
    Area,
    /// Share of total area
    PercentArea,
    /// Peak height
    Height,
    /// Concentration
    Concentration,
    /// Concentration unit
    Unit,
    /// USP theoretical plates
    UspPlateCount,
    /// USP tailing factor
    UspTailing,
    /// Integration mark
    Mark,
    /// Compound name
    Name,
}

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Flush left
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

impl Column {
    /// Alignment used for header and cells
    pub fn align(self) -> Align {
        match self {
            Column::PeakNumber | Column::RetentionTime | Column::Unit | Column::Mark => Align::Center,
            Column::Name => Align::Left,
            _ => Align::Right,
        }
    }

    /// Relative width; the renderer scales these to the page
    pub fn weight(self) -> f64 {
        match self {
            Column::PeakNumber | Column::Unit | Column::Mark => 12.0,
            Column::RetentionTime | Column::PercentArea => 16.0,
            Column::Area | Column::Height | Column::Concentration => 20.0,
            Column::UspPlateCount | Column::UspTailing => 26.0,
            Column::Name => 34.0,
        }
    }
}

/// One visible column
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    /// Column kind
    pub column: Column,
    /// Header text
    pub label: String,
}

/// Formatted peak table
#[derive(Debug, Clone, PartialEq)]
pub struct PeakTable {
    /// Visible columns in order
    pub columns: Vec<TableColumn>,
    /// One row per peak, cells aligned with `columns`
    pub rows: Vec<Vec<String>>,
    /// Total row: Area and Height sums, other cells blank
    pub total: Vec<String>,
}

fn label_or(label: &str, default: &str) -> String {
    if label.trim().is_empty() {
        default.to_string()
    } else {
        label.to_string()
    }
}

/// Visible columns for a configuration
pub fn columns(config: &Configuration) -> Vec<TableColumn> {
    let fields = &config.field_config;
    let column = |column, label: String| TableColumn { column, label };

    let mut out = vec![
        column(Column::PeakNumber, "Peak#".to_string()),
        column(Column::RetentionTime, "Ret. Time".to_string()),
    ];
    if fields.enable_area {
        out.push(column(Column::Area, label_or(&fields.area_label, labels::AREA)));
    }
    if fields.enable_percent_area {
        out.push(column(
            Column::PercentArea,
            label_or(&fields.percent_area_label, labels::PERCENT_AREA),
        ));
    }
    if fields.enable_height {
        out.push(column(Column::Height, label_or(&fields.height_label, labels::HEIGHT)));
    }
    if fields.enable_concentration {
        out.push(column(
            Column::Concentration,
            label_or(&fields.concentration_label, labels::CONCENTRATION),
        ));
        if config.concentration_settings.show_unit_column {
            out.push(column(Column::Unit, "Unit".to_string()));
        }
    }
    if fields.enable_usp_plate_count {
        out.push(column(
            Column::UspPlateCount,
            label_or(&fields.usp_plate_count_label, labels::USP_PLATE_COUNT),
        ));
    }
    if fields.enable_usp_tailing {
        out.push(column(
            Column::UspTailing,
            label_or(&fields.usp_tailing_label, labels::USP_TAILING),
        ));
    }
    if config.report_template.show_mark_column {
        out.push(column(Column::Mark, "Mark".to_string()));
    }
    out.push(column(Column::Name, "Name".to_string()));
    out
}

fn cell(
    column: Column,
    number: usize,
    peak: &Peak,
    sequence_percent: f64,
    peaks: &[Peak],
    config: &Configuration,
) -> String {
    match column {
        Column::PeakNumber => number.to_string(),
        Column::RetentionTime => format!("{:.3}", peak.retention_time),
        Column::Area => format!("{:.0}", peak.area),
        Column::PercentArea => format!("{:.2}", peak.percent_area.unwrap_or(sequence_percent)),
        Column::Height => format!("{:.0}", peak.height),
        Column::Concentration => format!(
            "{:.3}",
            metrics::concentration(peak, peaks, &ConcentrationOptions::default())
        ),
        Column::Unit => peak
            .concentration_unit
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| config.concentration_settings.default_unit.clone()),
        Column::UspPlateCount => format_scientific(
            peak.usp_plate_count
                .unwrap_or_else(|| metrics::derived_plate_count(peak)),
        ),
        Column::UspTailing => {
            format_scientific(peak.usp_tailing.unwrap_or_else(|| metrics::usp_tailing(peak)))
        }
        Column::Mark => peak.mark.clone().unwrap_or_default(),
        Column::Name => peak.peak_name.clone().unwrap_or_default(),
    }
}

impl PeakTable {
    /// Format `peaks` for the columns enabled in `config`
    pub fn build(peaks: &[Peak], config: &Configuration) -> Self {
        let columns = columns(config);

        // Stored records may lack percent areas; they always span the sequence
        let mut sequence = peaks.to_vec();
        metrics::compute_percent_areas(&mut sequence);

        let rows = peaks
            .iter()
            .zip(&sequence)
            .enumerate()
            .map(|(index, (peak, computed))| {
                let percent = computed.percent_area.unwrap_or(0.0);
                columns
                    .iter()
                    .map(|c| cell(c.column, index + 1, peak, percent, peaks, config))
                    .collect()
            })
            .collect();

        let total_area: f64 = peaks.iter().map(|p| p.area).sum();
        let total_height: f64 = peaks.iter().map(|p| p.height).sum();
        let total = columns
            .iter()
            .map(|c| match c.column {
                Column::PeakNumber => "Total".to_string(),
                Column::Area => format!("{:.0}", total_area),
                Column::Height => format!("{:.0}", total_height),
                _ => String::new(),
            })
            .collect();

        Self {
            columns,
            rows,
            total,
        }
    }

    /// Index of `column` among the visible columns
    pub fn position(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| c.column == column)
    }
}
