//! Chromatogram axis scaling

use crate::config::DetectorUnits;
use crate::model::Peak;

/// Standard increments for the signal axis maximum, one decade
pub const Y_AXIS_LADDER: [f64; 14] = [
    0.1, 0.2, 0.25, 0.4, 0.5, 0.8, 1.0, 1.2, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0,
];

/// Headroom above the tallest peak
pub const Y_HEADROOM: f64 = 1.2;

/// Time axis length without peaks or run time, minutes
pub const DEFAULT_TIME_AXIS: f64 = 10.0;

/// Headroom after the last retention time
pub const X_HEADROOM: f64 = 1.1;

/// Most intervals drawn on the time axis
pub const MAX_TIME_TICKS: f64 = 20.0;

/// A linear axis starting at 0
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Largest value on the axis
    pub max: f64,
    /// Tick values, ascending, starting at 0
    pub ticks: Vec<f64>,
}

impl Axis {
    /// Position of `value` as a fraction of the axis length
    pub fn fraction(&self, value: f64) -> f64 {
        if self.max > 0.0 {
            value / self.max
        } else {
            0.0
        }
    }
}

/// Decade multiplier that brings `value` into the ladder range
fn decade(value: f64) -> f64 {
    let top = Y_AXIS_LADDER[Y_AXIS_LADDER.len() - 1];
    let mut decade = 1.0;
    while value > top * decade && decade < 1e300 {
        decade *= 10.0;
    }
    decade
}

/// Smallest ladder value not below `calculated`
pub fn y_axis_max(calculated: f64) -> f64 {
    if !(calculated > 0.0) || !calculated.is_finite() {
        return Y_AXIS_LADDER[0];
    }
    let decade = decade(calculated);
    Y_AXIS_LADDER
        .iter()
        .map(|step| tidy(step * decade))
        .find(|&candidate| candidate >= calculated)
        .unwrap_or(Y_AXIS_LADDER[Y_AXIS_LADDER.len() - 1] * decade)
}

/// Tick values for a signal axis maximum taken from the ladder
pub fn y_ticks(max: f64) -> Vec<f64> {
    let decade = decade(max);
    let scaled = max / decade;
    let step = if scaled <= 0.4 {
        0.1
    } else if scaled <= 1.0 {
        scaled / 5.0
    } else if scaled <= 2.0 {
        0.25
    } else {
        0.5
    };
    let count = (scaled / step + 1e-9).floor() as usize;
    (0..=count).map(|i| tidy(i as f64 * step * decade)).collect()
}

/// Signal axis for `peaks` in the given detector units
pub fn y_axis(peaks: &[Peak], units: DetectorUnits) -> Axis {
    let max = if peaks.is_empty() {
        1.0
    } else {
        let tallest = peaks.iter().map(|p| p.height).fold(0.0, f64::max);
        y_axis_max(tallest / units.height_divisor() * Y_HEADROOM)
    };
    Axis {
        max,
        ticks: y_ticks(max),
    }
}

/// Rounded time axis length in minutes.
///
/// A configured run time wins; otherwise the last retention time plus 10 %
/// is rounded up.
pub fn x_axis_max(run_time: Option<f64>, max_retention_time: Option<f64>) -> f64 {
    let raw = match (run_time.filter(|t| t.is_finite() && *t > 0.0), max_retention_time) {
        (Some(run_time), _) => run_time,
        (None, Some(rt)) => (rt * X_HEADROOM).ceil(),
        (None, None) => DEFAULT_TIME_AXIS,
    };

    if !raw.is_finite() {
        DEFAULT_TIME_AXIS
    } else if raw <= 10.0 {
        10.0
    } else if raw <= 15.0 {
        15.0
    } else if raw <= 20.0 {
        20.0
    } else if raw <= 30.0 {
        30.0
    } else if raw <= 60.0 {
        (raw / 10.0).ceil() * 10.0
    } else {
        (raw / 30.0).ceil() * 30.0
    }
}

/// Tick spacing in minutes for a time axis length.
///
/// Past 60 minutes the 15 minute step doubles until the axis holds at most
/// [`MAX_TIME_TICKS`] intervals.
pub fn x_tick_step(max: f64) -> f64 {
    if max <= 10.0 {
        1.0
    } else if max <= 30.0 {
        5.0
    } else if max <= 60.0 {
        10.0
    } else {
        let mut step = 15.0;
        while max / step > MAX_TIME_TICKS && step.is_finite() {
            step *= 2.0;
        }
        step
    }
}

/// Time axis for a run
pub fn x_axis(run_time: Option<f64>, max_retention_time: Option<f64>) -> Axis {
    let max = x_axis_max(run_time, max_retention_time);
    let step = x_tick_step(max);
    let count = (max / step).floor() as usize;
    Axis {
        max,
        ticks: (0..=count).map(|i| i as f64 * step).collect(),
    }
}

/// Drop binary noise such as 0.30000000000000004
fn tidy(value: f64) -> f64 {
    let scale = 1e9 / decade(value.abs().max(1.0));
    (value * scale).round() / scale
}
