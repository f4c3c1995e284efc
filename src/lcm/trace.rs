//! Synthesized detector trace stored after the peak table

use crate::model::Peak;

use super::format::{
    DEFAULT_MAX_TIME, TRACE_BASELINE, TRACE_POINTS, TRACE_SIGMA, TRACE_TIME_FACTOR, TRACE_WINDOW,
};

/// Detector trace: evenly spaced `(time, intensity)` points
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Time span of the trace in minutes
    pub max_time: f32,
    /// Points as (minutes, intensity); the end point itself is excluded
    pub points: Vec<(f32, f32)>,
}

impl Trace {
    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trace holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest intensity, 0 for an empty trace
    pub fn max_intensity(&self) -> f32 {
        self.points.iter().map(|&(_, i)| i).fold(0.0, f32::max)
    }
}

/// Trace length for a peak list: 1.2 × the last retention time
pub fn trace_max_time(peaks: &[Peak]) -> f64 {
    peaks
        .iter()
        .map(|p| p.retention_time)
        .fold(None, |acc: Option<f64>, rt| Some(acc.map_or(rt, |m| m.max(rt))))
        .map(|rt| rt * TRACE_TIME_FACTOR)
        .unwrap_or(DEFAULT_MAX_TIME)
}

/// Intensity at `time`: baseline plus a narrow Gaussian per nearby peak
pub fn intensity_at(peaks: &[Peak], time: f64) -> f64 {
    let signal: f64 = peaks
        .iter()
        .filter(|p| (time - p.retention_time).abs() < TRACE_WINDOW)
        .map(|p| {
            let z = (time - p.retention_time) / TRACE_SIGMA;
            p.height * (-0.5 * z * z).exp()
        })
        .sum();
    (TRACE_BASELINE + signal).max(0.0)
}

/// Build the stored trace for `peaks`
pub fn synthesize_trace(peaks: &[Peak]) -> Trace {
    let max_time = trace_max_time(peaks);
    let points = (0..TRACE_POINTS)
        .map(|i| {
            let time = f64::from(i) / f64::from(TRACE_POINTS) * max_time;
            (time as f32, intensity_at(peaks, time) as f32)
        })
        .collect();

    Trace {
        max_time: max_time as f32,
        points,
    }
}
