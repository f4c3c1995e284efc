//! Metrics over a whole peak sequence

use log::debug;

use crate::model::Peak;

use super::{positive, round_to, total};

/// Set `percent_area` on every peak: `100 * area_i / sum(area)`.
///
/// When the total area is zero every peak gets 0.
pub fn compute_percent_areas(peaks: &mut [Peak]) {
    let total_area: f64 = peaks.iter().map(|p| p.area.max(0.0)).sum();

    if !(total_area > 0.0) || !total_area.is_finite() {
        debug!("Total area is zero; percent areas set to 0 for {} peaks", peaks.len());
        for peak in peaks.iter_mut() {
            peak.percent_area = Some(0.0);
        }
        return;
    }

    for peak in peaks.iter_mut() {
        peak.percent_area = Some(total(peak.area.max(0.0) / total_area * 100.0));
    }
}

/// Baseline width, estimated as `tR / 50` when not measured
fn width_or_estimate(peak: &Peak) -> f64 {
    positive(peak.width).unwrap_or(peak.retention_time / 50.0)
}

/// Resolution between two peaks: `Rs = 2 |tR2 - tR1| / (W1 + W2)`, 2 decimals
pub fn resolution(a: &Peak, b: &Peak) -> f64 {
    let time_diff = (b.retention_time - a.retention_time).abs();
    let widths = width_or_estimate(a) + width_or_estimate(b);
    if !(widths > 0.0) {
        return 0.0;
    }
    total(round_to(2.0 * time_diff / widths, 2))
}

/// Asymmetry factor estimate `1 + tR * 0.005`, 2 decimals
pub fn asymmetry(peak: &Peak) -> f64 {
    total(round_to(1.0 + peak.retention_time * 0.005, 2))
}

/// Peak capacity `1 + (tR_last - tR_first) / mean(W)`, rounded
pub fn peak_capacity(peaks: &[Peak]) -> f64 {
    if peaks.len() < 2 {
        return peaks.len() as f64;
    }
    let (first, last) = peaks.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.retention_time), hi.max(p.retention_time))
    });
    let mean_width = peaks.iter().map(width_or_estimate).sum::<f64>() / peaks.len() as f64;
    if !(mean_width > 0.0) {
        return 1.0;
    }
    total((1.0 + (last - first) / mean_width).round())
}

/// Suitability figures computed from the peaks of one run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuitabilitySummary {
    /// Smallest resolution between neighbouring peaks (by retention time)
    pub resolution: Option<f64>,
    /// Mean USP plate count
    pub efficiency: Option<f64>,
    /// Largest USP tailing factor
    pub tailing: Option<f64>,
    /// Largest asymmetry factor
    pub asymmetry: Option<f64>,
    /// Peak capacity of the run
    pub peak_capacity: f64,
}

/// Summarize column performance over a peak sequence.
///
/// Derived values already present on the peaks are used as-is; missing ones
/// are computed.
pub fn system_suitability(peaks: &[Peak]) -> SuitabilitySummary {
    if peaks.is_empty() {
        return SuitabilitySummary::default();
    }

    let mut ordered: Vec<&Peak> = peaks.iter().collect();
    ordered.sort_by(|a, b| a.retention_time.total_cmp(&b.retention_time));
    let resolution = ordered
        .windows(2)
        .map(|pair| resolution(pair[0], pair[1]))
        .fold(None, |acc: Option<f64>, rs| Some(acc.map_or(rs, |m| m.min(rs))));

    let plates: Vec<f64> = peaks
        .iter()
        .map(|p| p.usp_plate_count.unwrap_or_else(|| super::derived_plate_count(p)))
        .collect();
    let efficiency = Some((plates.iter().sum::<f64>() / plates.len() as f64).round());

    let tailing = peaks
        .iter()
        .map(|p| p.usp_tailing.unwrap_or_else(|| super::usp_tailing(p)))
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))));

    let largest_asymmetry = peaks
        .iter()
        .map(asymmetry)
        .fold(None, |acc: Option<f64>, a| Some(acc.map_or(a, |m| m.max(a))));

    SuitabilitySummary {
        resolution,
        efficiency,
        tailing,
        asymmetry: largest_asymmetry,
        peak_capacity: peak_capacity(peaks),
    }
}
