//! Concentration from calibration and internal standards

use crate::model::Peak;

use super::{round_to, total};

/// Divisor of the simplified external standard method
pub const EXTERNAL_STANDARD_DIVISOR: f64 = 1_000_000.0;

/// Calibration inputs for [`concentration`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentrationOptions {
    /// Response factor of the calibration
    pub calibration_factor: f64,
    /// Sample dilution
    pub dilution_factor: f64,
    /// Area of the internal standard peak
    pub internal_standard_area: Option<f64>,
    /// Position of the internal standard within the sample's peaks;
    /// used when `internal_standard_area` is not given
    pub internal_standard_index: Option<usize>,
}

impl Default for ConcentrationOptions {
    fn default() -> Self {
        Self {
            calibration_factor: 1.0,
            dilution_factor: 1.0,
            internal_standard_area: None,
            internal_standard_index: None,
        }
    }
}

/// Concentration of `peak`.
///
/// An operator-entered concentration always wins. With an internal standard
/// the response ratio is scaled: `(area / IS) * cal * dil`. Otherwise the
/// simplified external standard `area * cal * dil / 1e6` is rounded to 3
/// decimals.
pub fn concentration(peak: &Peak, all_peaks: &[Peak], options: &ConcentrationOptions) -> f64 {
    if let Some(value) = peak.concentration.filter(|c| c.is_finite()) {
        return value;
    }

    let area = peak.area.max(0.0);
    let internal_standard = options.internal_standard_area.or_else(|| {
        options
            .internal_standard_index
            .and_then(|i| all_peaks.get(i))
            .map(|p| p.area)
    });

    match internal_standard {
        Some(is_area) if is_area > 0.0 => {
            total(area / is_area * options.calibration_factor * options.dilution_factor)
        }
        _ => total(round_to(
            area * options.calibration_factor * options.dilution_factor
                / EXTERNAL_STANDARD_DIVISOR,
            3,
        )),
    }
}
