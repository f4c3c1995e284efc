//! # Peak Metrics
//!
//! Chromatographic quality figures derived from raw peak measurements.
//!
//! Every function here is pure, deterministic and total: degenerate input
//! (zero area, zero height, missing widths) yields a finite default or
//! estimate instead of an error, so report generation never fails on
//! metrics alone.
//!
//! ## Formulas
//!
//! | Metric | Measured | Estimated |
//! |--------|----------|-----------|
//! | USP plate count | `16 (tR/W)^2`, `5.54 (tR/W½)^2` | `max(5000, 20000 - A/H/100) + 500 tR` |
//! | USP tailing | `(a + b) / 2a` at 5 % height | `1 + clamp(0.1 sqrt(A)/H, 0, 0.5)` |
//! | Resolution | `2 ΔtR / (W1 + W2)` | W = tR / 50 |
//! | % Area | `100 A_i / ΣA` | |

mod concentration;
mod sequence;
mod usp;

#[cfg(test)]
mod tests;

pub use concentration::{concentration, ConcentrationOptions, EXTERNAL_STANDARD_DIVISOR};
pub use sequence::{
    asymmetry, compute_percent_areas, peak_capacity, resolution, system_suitability,
    SuitabilitySummary,
};
pub use usp::{
    peak_characteristics, usp_plate_count, usp_plate_count_half_height, usp_tailing,
    PeakCharacteristics, ASSUMED_PLATE_COUNT, BASELINE_COEFFICIENT, HALF_HEIGHT_COEFFICIENT,
};

use crate::model::Peak;

/// Plate count for the derived field: measured baseline width first, then
/// half-height width, then the area/height estimate.
pub fn derived_plate_count(peak: &Peak) -> f64 {
    if positive(peak.width).is_some() {
        usp_plate_count(peak)
    } else if positive(peak.width_at_50).is_some() {
        usp_plate_count_half_height(peak)
    } else {
        peak_characteristics(peak).usp_plate_count
    }
}

/// Fill `usp_plate_count` and `usp_tailing` of one peak
pub fn derive_peak(peak: &mut Peak) {
    peak.usp_plate_count = Some(derived_plate_count(peak));
    peak.usp_tailing = Some(usp_tailing(peak));
}

/// Recompute every derived field of a peak sequence
pub fn derive_all(peaks: &mut [Peak]) {
    compute_percent_areas(peaks);
    for peak in peaks.iter_mut() {
        derive_peak(peak);
    }
}

/// Measured width if it is a usable positive number
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Map non-finite results to 0
fn total(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
