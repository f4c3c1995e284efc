//! USP plate count and tailing factor

use crate::model::Peak;

use super::{positive, round_to, total};

/// Plate count assumed when no width measurement is available
pub const ASSUMED_PLATE_COUNT: f64 = 10_000.0;

/// Coefficient of the baseline-width plate count formula
pub const BASELINE_COEFFICIENT: f64 = 16.0;

/// Coefficient of the half-height plate count formula
pub const HALF_HEIGHT_COEFFICIENT: f64 = 5.54;

/// Plate count and tailing estimated from area and height alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCharacteristics {
    /// Estimated theoretical plates
    pub usp_plate_count: f64,
    /// Estimated tailing factor
    pub usp_tailing: f64,
    /// Estimated asymmetry factor
    pub asymmetry: f64,
}

/// USP plate count from the baseline width: `N = 16 (tR / W)^2`.
///
/// Without a width, W is estimated from [`ASSUMED_PLATE_COUNT`] as
/// `tR / (2 sqrt(N))`.
pub fn usp_plate_count(peak: &Peak) -> f64 {
    let rt = peak.retention_time;
    if !(rt > 0.0) {
        return 0.0;
    }
    let width = positive(peak.width).unwrap_or(rt / (2.0 * ASSUMED_PLATE_COUNT.sqrt()));
    total((BASELINE_COEFFICIENT * (rt / width).powi(2)).round())
}

/// USP plate count from the width at half height: `N = 5.54 (tR / W½)^2`.
///
/// Without a width, W½ is estimated as `tR / (4 sqrt(ln 2))`.
pub fn usp_plate_count_half_height(peak: &Peak) -> f64 {
    let rt = peak.retention_time;
    if !(rt > 0.0) {
        return 0.0;
    }
    let width = positive(peak.width_at_50)
        .unwrap_or(rt / (4.0 * std::f64::consts::LN_2.sqrt()));
    total((HALF_HEIGHT_COEFFICIENT * (rt / width).powi(2)).round())
}

/// USP tailing factor, rounded to 3 decimals.
///
/// With both the 5 % width and its leading half, `T = (a + b) / (2a)`.
/// With only the 5 % width the factor grows slightly with retention time.
/// Otherwise it is estimated from the height/sqrt(area) quality proxy.
pub fn usp_tailing(peak: &Peak) -> f64 {
    match (positive(peak.width_at_5), positive(peak.front_width_at_5)) {
        (Some(w5), Some(front)) => {
            let back = w5 - front;
            total(round_to((front + back) / (2.0 * front), 3))
        }
        (Some(_), None) => total(round_to(1.0 + peak.retention_time * 0.01, 3)),
        _ => tailing_from_quality(peak.area, peak.height),
    }
}

/// Generic estimate from area, height and retention time.
///
/// Broader peaks (larger area/height ratio) get fewer plates:
/// `efficiency = max(5000, 20000 - ratio / 100)` and
/// `N = round(efficiency + tR * 500)`. A peak without height is
/// unestimated and reports 0 plates.
pub fn peak_characteristics(peak: &Peak) -> PeakCharacteristics {
    let usp_plate_count = if peak.height > 0.0 {
        let ratio = peak.area.max(0.0) / peak.height;
        let efficiency = (20_000.0 - ratio / 100.0).max(5_000.0);
        total((efficiency + peak.retention_time * 500.0).round())
    } else {
        0.0
    };

    PeakCharacteristics {
        usp_plate_count,
        usp_tailing: tailing_from_quality(peak.area, peak.height),
        asymmetry: super::asymmetry(peak),
    }
}

/// `1 + clamp(0.1 / q, 0, 0.5)` with `q = height / sqrt(area)`
fn tailing_from_quality(area: f64, height: f64) -> f64 {
    if !(area > 0.0) {
        return 1.0;
    }
    if !(height > 0.0) {
        return 1.5;
    }
    let quality = height / area.sqrt();
    let variation = (0.1 / quality).clamp(0.0, 0.5);
    total(round_to(1.0 + variation, 3))
}
