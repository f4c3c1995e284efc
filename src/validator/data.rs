use crate::lcm::format::{
    offsets, record, DEFAULT_MAX_TIME, PEAK_RECORD_LEN, PLACEHOLDER_PEAK_ASYMMETRY,
    PLACEHOLDER_PEAK_WIDTH, TRACE_POINTS, TRACE_POINT_LEN, TRACE_PREAMBLE_LEN, TRACE_TIME_FACTOR,
};
use crate::lcm::{LcmFile, LcmPeak, LcmReader};

use super::{LcmSummary, Section, ValidationCheck, ValidationReport};

/// Relative tolerance when comparing the stored trace span
const TIME_SPAN_TOLERANCE: f64 = 1e-4;

/// Step 2: Data sanity checks on a structurally valid file
pub(crate) fn check_data_sanity(data: &[u8], report: &mut ValidationReport) {
    let file = match LcmReader::new().read(data) {
        Ok(file) => file,
        Err(e) => {
            report.add_check(ValidationCheck::failed(Section::Header, "Decode", e.to_string()));
            return;
        }
    };
    report.summary = Some(LcmSummary::new(&file, data.len()));

    if file.sample_id.is_empty() {
        report.add_check(
            ValidationCheck::warning(Section::Header, "Sample ID", "Sample ID is empty")
                .at(offsets::SAMPLE_ID),
        );
    } else {
        report.add_check(ValidationCheck::ok(Section::Header, "Sample ID"));
    }

    check_peaks(&file, report);
    check_trace(&file, report);
}

/// Offset of `field` in the record at `index`
fn peak_field(index: usize, field: usize) -> usize {
    offsets::PEAKS + index * PEAK_RECORD_LEN + field
}

/// Pass when no record matches `bad`, otherwise report the first one
fn peak_check(
    file: &LcmFile,
    report: &mut ValidationReport,
    name: &str,
    field: usize,
    bad: impl Fn(usize, &LcmPeak) -> bool,
    finding: impl FnOnce(usize, &LcmPeak, usize) -> ValidationCheck,
) {
    let offending: Vec<usize> = file
        .peaks
        .iter()
        .enumerate()
        .filter(|(i, p)| bad(*i, *p))
        .map(|(i, _)| i)
        .collect();
    match offending.first() {
        None => report.add_check(ValidationCheck::ok(Section::PeakTable, name)),
        Some(&first) => report.add_check(
            finding(first, &file.peaks[first], offending.len()).at(peak_field(first, field)),
        ),
    }
}

fn check_peaks(file: &LcmFile, report: &mut ValidationReport) {
    peak_check(
        file,
        report,
        "Peak numbering",
        record::NUMBER,
        |i, p| usize::from(p.number) != i + 1,
        |i, p, n| {
            ValidationCheck::failed(
                Section::PeakTable,
                "Peak numbering",
                format!("record {} is numbered {} ({} out of order)", i + 1, p.number, n),
            )
        },
    );

    peak_check(
        file,
        report,
        "Retention times",
        record::RETENTION_TIME,
        |_, p| !p.retention_time.is_finite() || p.retention_time <= 0.0,
        |_, p, n| {
            ValidationCheck::failed(
                Section::PeakTable,
                "Retention times",
                format!(
                    "peak {} has retention time {} ({} non-positive)",
                    p.number, p.retention_time, n
                ),
            )
        },
    );

    peak_check(
        file,
        report,
        "Areas and heights",
        record::AREA,
        |_, p| !(p.area.is_finite() && p.area >= 0.0 && p.height.is_finite() && p.height >= 0.0),
        |_, p, n| {
            ValidationCheck::failed(
                Section::PeakTable,
                "Areas and heights",
                format!(
                    "peak {} has area {} and height {} ({} peaks affected)",
                    p.number, p.area, p.height, n
                ),
            )
        },
    );

    peak_check(
        file,
        report,
        "Concentrations",
        record::CONCENTRATION,
        |_, p| !p.concentration.is_finite() || p.concentration < 0.0,
        |_, p, n| {
            ValidationCheck::warning(
                Section::PeakTable,
                "Concentrations",
                format!("peak {} stores {} ({} peaks affected)", p.number, p.concentration, n),
            )
        },
    );

    peak_check(
        file,
        report,
        "Peak names",
        record::NAME,
        |_, p| p.name.is_empty(),
        |_, p, n| {
            ValidationCheck::warning(
                Section::PeakTable,
                "Peak names",
                format!("peak {} has no name ({} unnamed)", p.number, n),
            )
        },
    );

    peak_check(
        file,
        report,
        "Peak shape fields",
        record::WIDTH,
        |_, p| p.width != PLACEHOLDER_PEAK_WIDTH || p.asymmetry != PLACEHOLDER_PEAK_ASYMMETRY,
        |_, p, n| {
            ValidationCheck::warning(
                Section::PeakTable,
                "Peak shape fields",
                format!(
                    "peak {} stores width {} and asymmetry {}, expected {}/{} ({} peaks)",
                    p.number,
                    p.width,
                    p.asymmetry,
                    PLACEHOLDER_PEAK_WIDTH,
                    PLACEHOLDER_PEAK_ASYMMETRY,
                    n
                ),
            )
        },
    );
}

fn check_trace(file: &LcmFile, report: &mut ValidationReport) {
    let trace = &file.trace;
    let trace_start = offsets::PEAKS + file.peaks.len() * PEAK_RECORD_LEN;
    let point_at = |i: usize| trace_start + TRACE_PREAMBLE_LEN + i * TRACE_POINT_LEN;

    if trace.len() == TRACE_POINTS as usize {
        report.add_check(ValidationCheck::ok(Section::Trace, "Trace points"));
    } else {
        report.add_check(
            ValidationCheck::warning(
                Section::Trace,
                "Trace points",
                format!("{} points (expected {})", trace.len(), TRACE_POINTS),
            )
            .at(trace_start),
        );
    }

    let expected_span = file
        .peaks
        .iter()
        .map(|p| f64::from(p.retention_time))
        .fold(None, |acc: Option<f64>, rt| Some(acc.map_or(rt, |m| m.max(rt))))
        .map(|rt| rt * TRACE_TIME_FACTOR)
        .unwrap_or(DEFAULT_MAX_TIME);
    let span = f64::from(trace.max_time);
    if (span - expected_span).abs() <= expected_span.abs() * TIME_SPAN_TOLERANCE {
        report.add_check(ValidationCheck::ok(Section::Trace, "Trace span"));
    } else {
        report.add_check(
            ValidationCheck::warning(
                Section::Trace,
                "Trace span",
                format!("{:.3} min, expected {:.3} min", span, expected_span),
            )
            .at(trace_start + 4),
        );
    }

    let bad_time = trace.points.iter().enumerate().position(|(i, &(t, _))| {
        let after_previous = i == 0 || trace.points[i - 1].0 < t;
        !(t.is_finite() && t >= 0.0 && t <= trace.max_time && after_previous)
    });
    match bad_time {
        None => report.add_check(ValidationCheck::ok(Section::Trace, "Trace times")),
        Some(i) => report.add_check(
            ValidationCheck::failed(
                Section::Trace,
                "Trace times",
                format!(
                    "point {} at {} min is not increasing within the trace span",
                    i, trace.points[i].0
                ),
            )
            .at(point_at(i)),
        ),
    }

    let bad_intensity = trace
        .points
        .iter()
        .position(|&(_, v)| !(v.is_finite() && v >= 0.0));
    match bad_intensity {
        None => report.add_check(ValidationCheck::ok(Section::Trace, "Trace intensities")),
        Some(i) => report.add_check(
            ValidationCheck::failed(
                Section::Trace,
                "Trace intensities",
                format!("point {} has intensity {}", i, trace.points[i].1),
            )
            .at(point_at(i) + 4),
        ),
    }
}
