//! # LCM Binary Format
//!
//! Fixed-layout little-endian container that carries a sample's peak table
//! together with a synthesized detector trace for downstream instrument
//! software.
//!
//! ## Layout
//!
//! | Section | Contents |
//! |---------|----------|
//! | Header (172 bytes) | `"LCM\0"`, version u16 = 100, sample id [32], sample name [64], analysis date u32, peak count u16, 64 reserved |
//! | Peak record (82 bytes each) | number u16, RT f32, area f64, height f64, concentration f32, name [32], width f32, asymmetry f32, 16 reserved |
//! | Trace | point count u32, max time f32, points × (time f32, intensity f32) |
//! | Footer | `"LCMEND\0"` |
//!
//! String fields hold at most `len - 1` bytes followed by zero padding.
//!
//! ## Example
//!
//! ```rust
//! use lcpeak::config::Configuration;
//! use lcpeak::lcm::{LcmReader, LcmWriter};
//! use lcpeak::model::{Peak, SampleBuilder};
//!
//! let sample = SampleBuilder::new("Caffeine std")
//!     .sample_id("S1")
//!     .add_peak(Peak::new(2.345, 1_245_678.0, 89_234.0))
//!     .build(&Configuration::default())?;
//!
//! let bytes = LcmWriter::new().encode(&sample)?;
//! let file = LcmReader::new().read(&bytes)?;
//! assert_eq!(file.peaks.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod format;
mod reader;
mod trace;
mod writer;


pub use crate::validator::validate_lcm;
pub use error::LcmError;
pub use reader::{LcmFile, LcmPeak, LcmReader};
pub use trace::{intensity_at, synthesize_trace, trace_max_time, Trace};
pub use writer::{LcmStats, LcmWriter};

use crate::model::Sample;

/// Encode `sample` as LCM bytes
pub fn encode_lcm(sample: &Sample) -> Result<Vec<u8>, LcmError> {
    LcmWriter::new().encode(sample)
}
