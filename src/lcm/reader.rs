use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use log::debug;

use super::error::LcmError;
use super::format::{
    FOOTER, HEADER_LEN, HEADER_RESERVED_LEN, MAGIC, PEAK_NAME_LEN, PEAK_RECORD_LEN,
    PEAK_RESERVED_LEN, SAMPLE_ID_LEN, SAMPLE_NAME_LEN, TRACE_POINT_LEN, TRACE_PREAMBLE_LEN,
    VERSION,
};
use super::trace::Trace;

/// One decoded peak record
#[derive(Debug, Clone, PartialEq)]
pub struct LcmPeak {
    /// 1-based peak number
    pub number: u16,
    /// Retention time in minutes
    pub retention_time: f32,
    /// Peak area
    pub area: f64,
    /// Peak height
    pub height: f64,
    /// Concentration, 0 when none was entered
    pub concentration: f32,
    /// Peak name
    pub name: String,
    /// Stored peak width
    pub width: f32,
    /// Stored asymmetry
    pub asymmetry: f32,
}

/// Decoded contents of an LCM file
#[derive(Debug, Clone, PartialEq)]
pub struct LcmFile {
    /// Format version
    pub version: u16,
    /// Sample identifier
    pub sample_id: String,
    /// Sample name
    pub sample_name: String,
    /// Analysis time in unix seconds
    pub analysis_timestamp: u32,
    /// Peak records in file order
    pub peaks: Vec<LcmPeak>,
    /// Stored detector trace
    pub trace: Trace,
}

impl LcmFile {
    /// Analysis time as a UTC date
    pub fn analysis_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.analysis_timestamp), 0)
    }
}

/// Decoder for the LCM binary format
#[derive(Debug, Default, Clone, Copy)]
pub struct LcmReader;

impl LcmReader {
    /// Create a reader
    pub fn new() -> Self {
        Self
    }

    /// Decode a complete LCM file
    pub fn read(&self, data: &[u8]) -> Result<LcmFile, LcmError> {
        if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
            return Err(LcmError::BadMagic(data.iter().take(MAGIC.len()).copied().collect()));
        }
        require(data, 0, HEADER_LEN, "header")?;

        let mut cursor = Cursor::new(data);
        cursor.set_position(MAGIC.len() as u64);

        let version = cursor.read_u16::<LittleEndian>()?;
        if version != VERSION {
            return Err(LcmError::UnsupportedVersion(version));
        }
        let sample_id = read_fixed_str(&mut cursor, SAMPLE_ID_LEN)?;
        let sample_name = read_fixed_str(&mut cursor, SAMPLE_NAME_LEN)?;
        let analysis_timestamp = cursor.read_u32::<LittleEndian>()?;
        let peak_count = usize::from(cursor.read_u16::<LittleEndian>()?);
        skip(&mut cursor, HEADER_RESERVED_LEN)?;

        require(data, HEADER_LEN, peak_count * PEAK_RECORD_LEN, "peak table")?;
        let mut peaks = Vec::with_capacity(peak_count);
        for _ in 0..peak_count {
            let number = cursor.read_u16::<LittleEndian>()?;
            let retention_time = cursor.read_f32::<LittleEndian>()?;
            let area = cursor.read_f64::<LittleEndian>()?;
            let height = cursor.read_f64::<LittleEndian>()?;
            let concentration = cursor.read_f32::<LittleEndian>()?;
            let name = read_fixed_str(&mut cursor, PEAK_NAME_LEN)?;
            let width = cursor.read_f32::<LittleEndian>()?;
            let asymmetry = cursor.read_f32::<LittleEndian>()?;
            skip(&mut cursor, PEAK_RESERVED_LEN)?;
            peaks.push(LcmPeak {
                number,
                retention_time,
                area,
                height,
                concentration,
                name,
                width,
                asymmetry,
            });
        }

        let trace_start = cursor.position() as usize;
        require(data, trace_start, TRACE_PREAMBLE_LEN, "trace")?;
        let point_count = cursor.read_u32::<LittleEndian>()? as usize;
        let max_time = cursor.read_f32::<LittleEndian>()?;
        require(
            data,
            trace_start + TRACE_PREAMBLE_LEN,
            point_count.saturating_mul(TRACE_POINT_LEN),
            "trace",
        )?;
        let mut points = Vec::with_capacity(point_count);
        for _ in 0..point_count {
            let time = cursor.read_f32::<LittleEndian>()?;
            let intensity = cursor.read_f32::<LittleEndian>()?;
            points.push((time, intensity));
        }

        let footer_start = cursor.position() as usize;
        let rest = &data[footer_start..];
        if rest.len() < FOOTER.len() || &rest[..FOOTER.len()] != FOOTER {
            return Err(LcmError::BadFooter);
        }
        let trailing = rest.len() - FOOTER.len();
        if trailing > 0 {
            return Err(LcmError::TrailingBytes(trailing));
        }

        debug!(
            "Decoded LCM {}: {} peaks, {} trace points",
            sample_id,
            peaks.len(),
            points.len()
        );

        Ok(LcmFile {
            version,
            sample_id,
            sample_name,
            analysis_timestamp,
            peaks,
            trace: Trace { max_time, points },
        })
    }
}

/// Fail with `Truncated` unless `len` bytes are available at `offset`
fn require(data: &[u8], offset: usize, len: usize, section: &'static str) -> Result<(), LcmError> {
    let available = data.len().saturating_sub(offset);
    if available < len {
        return Err(LcmError::Truncated {
            section,
            needed: len,
            available,
        });
    }
    Ok(())
}

fn skip(cursor: &mut Cursor<&[u8]>, len: usize) -> std::io::Result<()> {
    let mut reserved = vec![0u8; len];
    cursor.read_exact(&mut reserved)
}

/// Read a NUL-padded field; invalid UTF-8 from a split character is replaced
pub(crate) fn read_fixed_str(cursor: &mut Cursor<&[u8]>, len: usize) -> std::io::Result<String> {
    let mut field = vec![0u8; len];
    cursor.read_exact(&mut field)?;
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    Ok(String::from_utf8_lossy(&field[..end]).into_owned())
}
