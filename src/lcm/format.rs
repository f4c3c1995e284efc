//! Constants of the LCM layout. All integers and floats are little-endian.

/// File signature
pub const MAGIC: &[u8; 4] = b"LCM\0";

/// Format version written by this crate
pub const VERSION: u16 = 100;

/// Sample ID field width (31 usable bytes + NUL)
pub const SAMPLE_ID_LEN: usize = 32;

/// Sample name field width (63 usable bytes + NUL)
pub const SAMPLE_NAME_LEN: usize = 64;

/// Reserved bytes closing the header
pub const HEADER_RESERVED_LEN: usize = 64;

/// Peak name field width (31 usable bytes + NUL)
pub const PEAK_NAME_LEN: usize = 32;

/// Reserved bytes closing each peak record
pub const PEAK_RESERVED_LEN: usize = 16;

/// Peak width written for every peak; not derived from data
pub const PLACEHOLDER_PEAK_WIDTH: f32 = 0.1;

/// Peak asymmetry written for every peak; not derived from data
pub const PLACEHOLDER_PEAK_ASYMMETRY: f32 = 1.0;

/// Number of synthesized trace points
pub const TRACE_POINTS: u32 = 1000;

/// Detector baseline of the synthesized trace
pub const TRACE_BASELINE: f64 = 50.0;

/// Gaussian sigma of each synthesized peak, minutes
pub const TRACE_SIGMA: f64 = 0.05;

/// Peaks further than this from a time point do not contribute, minutes
pub const TRACE_WINDOW: f64 = 0.5;

/// Trace length relative to the last retention time
pub const TRACE_TIME_FACTOR: f64 = 1.2;

/// Trace length when the sample has no peaks, minutes
pub const DEFAULT_MAX_TIME: f64 = 10.0;

/// File trailer
pub const FOOTER: &[u8; 7] = b"LCMEND\0";

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 4 + 2 + SAMPLE_ID_LEN + SAMPLE_NAME_LEN + 4 + 2 + HEADER_RESERVED_LEN;

/// Size of one peak record in bytes
pub const PEAK_RECORD_LEN: usize = 2 + 4 + 8 + 8 + 4 + PEAK_NAME_LEN + 4 + 4 + PEAK_RESERVED_LEN;

/// Size of one trace point (time + intensity) in bytes
pub const TRACE_POINT_LEN: usize = 8;

/// Size of the trace preamble (point count + max time) in bytes
pub const TRACE_PREAMBLE_LEN: usize = 8;

/// Total file size for `peaks` peaks and `points` trace points
pub const fn file_len(peaks: usize, points: usize) -> usize {
    HEADER_LEN + peaks * PEAK_RECORD_LEN + TRACE_PREAMBLE_LEN + points * TRACE_POINT_LEN + FOOTER.len()
}

/// Byte offsets of the header fields
pub mod offsets {
    /// Version (u16)
    pub const VERSION: usize = 4;
    /// Sample ID field
    pub const SAMPLE_ID: usize = 6;
    /// Sample name field
    pub const SAMPLE_NAME: usize = 38;
    /// Analysis date (u32 unix seconds)
    pub const ANALYSIS_DATE: usize = 102;
    /// Peak count (u16)
    pub const PEAK_COUNT: usize = 106;
    /// First peak record
    pub const PEAKS: usize = super::HEADER_LEN;
}

/// Field offsets within one peak record
pub mod record {
    /// Peak number (u16)
    pub const NUMBER: usize = 0;
    /// Retention time (f32)
    pub const RETENTION_TIME: usize = 2;
    /// Area (f64)
    pub const AREA: usize = 6;
    /// Height (f64)
    pub const HEIGHT: usize = 14;
    /// Concentration (f32)
    pub const CONCENTRATION: usize = 22;
    /// Name field
    pub const NAME: usize = 26;
    /// Width (f32)
    pub const WIDTH: usize = 58;
    /// Asymmetry (f32)
    pub const ASYMMETRY: usize = 62;
}
