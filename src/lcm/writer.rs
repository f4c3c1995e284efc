use std::fmt;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::model::Sample;

use super::error::LcmError;
use super::format::{
    file_len, FOOTER, HEADER_RESERVED_LEN, MAGIC, PEAK_NAME_LEN, PEAK_RESERVED_LEN,
    PLACEHOLDER_PEAK_ASYMMETRY, PLACEHOLDER_PEAK_WIDTH, SAMPLE_ID_LEN, SAMPLE_NAME_LEN, VERSION,
};
use super::trace::synthesize_trace;

/// Statistics from a completed LCM encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcmStats {
    /// Number of peak records written
    pub peaks_written: usize,
    /// Number of trace points written
    pub trace_points: usize,
    /// Total size in bytes
    pub bytes_written: usize,
}

impl fmt::Display for LcmStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} peaks and {} trace points ({} bytes)",
            self.peaks_written, self.trace_points, self.bytes_written
        )
    }
}

/// Encoder for the LCM binary format.
///
/// The sample is validated before anything is produced, and the whole file
/// is assembled in memory, so a failed encode never leaves partial output
/// behind in the destination.
#[derive(Debug, Default, Clone, Copy)]
pub struct LcmWriter;

impl LcmWriter {
    /// Create a writer
    pub fn new() -> Self {
        Self
    }

    /// Encode `sample` into a byte buffer
    pub fn encode(&self, sample: &Sample) -> Result<Vec<u8>, LcmError> {
        sample.validate()?;

        let trace = synthesize_trace(&sample.peaks);
        let mut buf = Vec::with_capacity(file_len(sample.peaks.len(), trace.len()));

        buf.write_all(MAGIC)?;
        buf.write_u16::<LittleEndian>(VERSION)?;
        write_fixed_str(&mut buf, &sample.sample_id, SAMPLE_ID_LEN)?;
        write_fixed_str(&mut buf, &sample.sample_name, SAMPLE_NAME_LEN)?;
        buf.write_u32::<LittleEndian>(unix_seconds(&sample.analysis_date))?;
        // validate() bounds the count to u16
        buf.write_u16::<LittleEndian>(sample.peaks.len() as u16)?;
        buf.write_all(&[0u8; HEADER_RESERVED_LEN])?;

        for (index, peak) in sample.peaks.iter().enumerate() {
            let number = index + 1;
            buf.write_u16::<LittleEndian>(number as u16)?;
            buf.write_f32::<LittleEndian>(peak.retention_time as f32)?;
            buf.write_f64::<LittleEndian>(peak.area)?;
            buf.write_f64::<LittleEndian>(peak.height)?;
            buf.write_f32::<LittleEndian>(peak.concentration.unwrap_or(0.0) as f32)?;
            write_fixed_str(&mut buf, &peak.name_or_default(number), PEAK_NAME_LEN)?;
            buf.write_f32::<LittleEndian>(PLACEHOLDER_PEAK_WIDTH)?;
            buf.write_f32::<LittleEndian>(PLACEHOLDER_PEAK_ASYMMETRY)?;
            buf.write_all(&[0u8; PEAK_RESERVED_LEN])?;
        }

        buf.write_u32::<LittleEndian>(trace.len() as u32)?;
        buf.write_f32::<LittleEndian>(trace.max_time)?;
        for &(time, intensity) in &trace.points {
            buf.write_f32::<LittleEndian>(time)?;
            buf.write_f32::<LittleEndian>(intensity)?;
        }

        buf.write_all(FOOTER)?;

        debug!(
            "Encoded LCM for {}: {} peaks, trace of {} points over {:.3} min",
            sample.sample_id,
            sample.peaks.len(),
            trace.len(),
            trace.max_time
        );
        Ok(buf)
    }

    /// Encode `sample` and write it to `writer` in one piece
    pub fn write_to<W: Write>(&self, sample: &Sample, mut writer: W) -> Result<LcmStats, LcmError> {
        let bytes = self.encode(sample)?;
        writer.write_all(&bytes)?;
        writer.flush()?;

        let stats = LcmStats {
            peaks_written: sample.peaks.len(),
            trace_points: super::format::TRACE_POINTS as usize,
            bytes_written: bytes.len(),
        };
        info!("{}", stats);
        Ok(stats)
    }
}

/// Write `value` into a zero-padded field of `len` bytes.
///
/// At most `len - 1` bytes of the UTF-8 encoding are kept, so the field is
/// always NUL-terminated. The cut is by byte and may split a character.
pub(crate) fn write_fixed_str<W: Write>(out: &mut W, value: &str, len: usize) -> std::io::Result<()> {
    let bytes = value.as_bytes();
    let used = bytes.len().min(len.saturating_sub(1));
    out.write_all(&bytes[..used])?;
    out.write_all(&vec![0u8; len - used])
}

/// Unix seconds of `date`, saturated to the u32 range
fn unix_seconds(date: &DateTime<Utc>) -> u32 {
    date.timestamp().clamp(0, i64::from(u32::MAX)) as u32
}
