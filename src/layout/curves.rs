//! Gaussian peak shapes for the chromatogram

use crate::config::DetectorUnits;
use crate::model::Peak;

use super::axis::Axis;

/// Points sampled per peak
pub const CURVE_POINTS: usize = 167;

/// Half-width of a drawn peak as a fraction of the chart width
pub const CURVE_HALF_WIDTH: f64 = 2.5 / 190.0;

/// Shape of one peak in chart coordinates.
///
/// Coordinates are fractions of the plot area: x from the time origin,
/// y from the baseline, both within `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakCurve {
    /// 1-based peak number
    pub number: usize,
    /// Label drawn above the apex, `<name> - <RT>` or just the RT
    pub label: String,
    /// Apex position
    pub apex: (f64, f64),
    /// Polyline through the peak shape, left to right
    pub points: Vec<(f64, f64)>,
}

/// Label for the apex of a peak
pub fn peak_label(peak: &Peak) -> String {
    match peak.peak_name.as_deref() {
        Some(name) if !name.is_empty() => format!("{} - {:.3}", name, peak.retention_time),
        _ => format!("{:.3}", peak.retention_time),
    }
}

/// Curves for every peak that falls on the time axis
pub fn peak_curves(peaks: &[Peak], x_axis: &Axis, y_axis: &Axis, units: DetectorUnits) -> Vec<PeakCurve> {
    let sigma = CURVE_HALF_WIDTH / 4.0;
    let step = 2.0 * CURVE_HALF_WIDTH / (CURVE_POINTS - 1) as f64;

    peaks
        .iter()
        .enumerate()
        .filter_map(|(index, peak)| {
            let center = x_axis.fraction(peak.retention_time);
            if !(0.0..=1.0).contains(&center) {
                return None;
            }
            let top = y_axis
                .fraction(peak.height / units.height_divisor())
                .clamp(0.0, 1.0);

            let points = (0..CURVE_POINTS)
                .map(|i| {
                    let offset = -CURVE_HALF_WIDTH + i as f64 * step;
                    let y = top * (-(offset * offset) / (2.0 * sigma * sigma)).exp();
                    (center + offset, y.clamp(0.0, 1.0))
                })
                .filter(|&(x, _)| (0.0..=1.0).contains(&x))
                .collect();

            Some(PeakCurve {
                number: index + 1,
                label: peak_label(peak),
                apex: (center, top),
                points,
            })
        })
        .collect()
}
