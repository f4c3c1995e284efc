use byteorder::{ByteOrder, LittleEndian};

use crate::lcm::format::{
    offsets, FOOTER, HEADER_LEN, MAGIC, PEAK_RECORD_LEN, TRACE_POINT_LEN, TRACE_PREAMBLE_LEN,
    VERSION,
};

use super::{Section, ValidationCheck, ValidationReport};

/// Step 1: Structure validation.
///
/// Returns the length of the well-formed file (footer included) when the
/// data can be decoded, `None` otherwise.
pub(crate) fn check_structure(data: &[u8], report: &mut ValidationReport) -> Option<usize> {
    if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
        report.add_check(
            ValidationCheck::failed(
                Section::Header,
                "Signature",
                "Data does not start with \"LCM\\0\"",
            )
            .at(0),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::Header, "Signature"));

    if data.len() < HEADER_LEN {
        report.add_check(
            ValidationCheck::failed(
                Section::Header,
                "Header size",
                format!("Header needs {} bytes, file has {}", HEADER_LEN, data.len()),
            )
            .at(data.len()),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::Header, "Header size"));

    let version = LittleEndian::read_u16(&data[offsets::VERSION..]);
    if version != VERSION {
        report.add_check(
            ValidationCheck::failed(
                Section::Header,
                "Version",
                format!("Version {} is not supported (expected {})", version, VERSION),
            )
            .at(offsets::VERSION),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::Header, "Version"));

    let reserved = offsets::PEAK_COUNT + 2;
    match data[reserved..HEADER_LEN].iter().position(|&b| b != 0) {
        Some(i) => report.add_check(
            ValidationCheck::warning(
                Section::Header,
                "Reserved header bytes",
                "Reserved header bytes are not zero",
            )
            .at(reserved + i),
        ),
        None => report.add_check(ValidationCheck::ok(Section::Header, "Reserved header bytes")),
    }

    let peak_count = usize::from(LittleEndian::read_u16(&data[offsets::PEAK_COUNT..]));
    let trace_start = HEADER_LEN + peak_count * PEAK_RECORD_LEN;
    if data.len() < trace_start + TRACE_PREAMBLE_LEN {
        report.add_check(
            ValidationCheck::failed(
                Section::PeakTable,
                "Peak table size",
                format!(
                    "{} peak records need {} bytes, {} available",
                    peak_count,
                    peak_count * PEAK_RECORD_LEN,
                    data.len() - HEADER_LEN
                ),
            )
            .at(offsets::PEAK_COUNT),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::PeakTable, "Peak table size"));

    let point_count = LittleEndian::read_u32(&data[trace_start..]) as usize;
    let footer_start = trace_start + TRACE_PREAMBLE_LEN + point_count.saturating_mul(TRACE_POINT_LEN);
    if data.len() < footer_start {
        report.add_check(
            ValidationCheck::failed(
                Section::Trace,
                "Trace size",
                format!("{} trace points do not fit in the remaining data", point_count),
            )
            .at(trace_start),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::Trace, "Trace size"));

    let end = footer_start + FOOTER.len();
    if data.len() < end || &data[footer_start..end] != FOOTER {
        report.add_check(
            ValidationCheck::failed(
                Section::Footer,
                "Footer",
                "Missing \"LCMEND\\0\" after the trace",
            )
            .at(footer_start),
        );
        return None;
    }
    report.add_check(ValidationCheck::ok(Section::Footer, "Footer"));

    if data.len() > end {
        report.add_check(
            ValidationCheck::warning(
                Section::Footer,
                "File size",
                format!("{} unexpected bytes after the footer", data.len() - end),
            )
            .at(end),
        );
    } else {
        report.add_check(ValidationCheck::ok(Section::Footer, "File size"));
    }

    Some(end)
}
