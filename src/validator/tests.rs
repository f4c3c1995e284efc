use byteorder::{ByteOrder, LittleEndian};

use super::*;
use crate::config::Configuration;
use crate::lcm::{encode_lcm, format};
use crate::model::{Peak, SampleBuilder};

fn valid_lcm() -> Vec<u8> {
    let sample = SampleBuilder::new("Validation sample")
        .sample_id("SAMPLE_V")
        .add_peak(Peak::new(1.25, 12_000.0, 1_500.0).with_name("Uracil"))
        .add_peak(Peak::new(3.5, 48_000.0, 4_200.0))
        .build(&Configuration::default())
        .unwrap();
    encode_lcm(&sample).unwrap()
}

#[test]
fn test_report_text_groups_by_section() {
    let mut report = ValidationReport::new("test.lcm");
    report.add_check(ValidationCheck::ok(Section::Header, "Signature"));
    report.add_check(ValidationCheck::warning(Section::PeakTable, "Peak names", "unnamed").at(0xAC));
    report.add_check(ValidationCheck::failed(Section::Footer, "Footer", "missing").at(0x2100));

    let output = format!("{}", report);
    assert!(output.starts_with("LCM validation: test.lcm"));
    let header = output.find("\nHeader\n").unwrap();
    let peaks = output.find("\nPeak table\n").unwrap();
    let footer = output.find("\nFooter\n").unwrap();
    assert!(header < peaks && peaks < footer);
    assert!(!output.contains("\nTrace\n"));
    assert!(output.contains("  warn  Peak names @ 0x00AC: unnamed"));
    assert!(output.contains("  FAIL  Footer @ 0x2100: missing"));
    assert!(output.contains("Result: INVALID (1 passed, 1 warnings, 1 failed)"));

    assert_eq!(
        report.counts(),
        CheckCounts {
            passed: 1,
            warnings: 1,
            failed: 1
        }
    );
    assert_eq!(report.first_failure().map(|c| c.name.as_str()), Some("Footer"));
}

#[test]
fn test_report_json() {
    let mut report = ValidationReport::new("test.lcm");
    report.add_check(ValidationCheck::ok(Section::Header, "Signature"));
    report.add_check(ValidationCheck::failed(Section::Footer, "Footer", "missing").at(300));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["source"], "test.lcm");
    assert!(json["summary"].is_null());
    assert_eq!(json["checks"][0]["section"], "header");
    assert_eq!(json["checks"][0]["status"]["status"], "ok");
    assert!(json["checks"][0].get("offset").is_none());
    assert_eq!(json["checks"][1]["section"], "footer");
    assert_eq!(json["checks"][1]["status"]["message"], "missing");
    assert_eq!(json["checks"][1]["offset"], 300);
}

#[test]
fn test_valid_file_passes_cleanly() {
    let report = validate_lcm(&valid_lcm(), "valid.lcm");
    assert!(report.is_valid(), "{}", report);
    assert!(!report.has_warnings(), "{}", report);
    assert!(report.check("Peak numbering").is_some());
    assert!(report.check("Trace intensities").map_or(false, |c| c.status.is_ok()));

    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.sample_id, "SAMPLE_V");
    assert_eq!(summary.sample_name, "Validation sample");
    assert_eq!(summary.version, 100);
    assert_eq!(summary.peak_count, 2);
    assert_eq!(summary.trace_points, 1000);
    assert_eq!(summary.file_len, format::file_len(2, 1000));
    assert!(report.section(Section::PeakTable).all(|c| c.status.is_ok()));
    assert!(format!("{}", report).contains("Result: VALID ("));
}

#[test]
fn test_not_an_lcm_file() {
    let report = validate_lcm(b"%PDF-1.5", "report.pdf");
    assert!(!report.is_valid());
    assert!(report.check("Signature").map_or(false, |c| c.status.is_failed()));
    assert_eq!(report.checks.len(), 1);
    assert!(report.summary.is_none());
    assert_eq!(report.first_failure().and_then(|c| c.offset), Some(0));
}

#[test]
fn test_unsupported_version_fails() {
    let mut data = valid_lcm();
    LittleEndian::write_u16(&mut data[format::offsets::VERSION..], 200);
    let report = validate_lcm(&data, "v200.lcm");
    let version = report.check("Version").unwrap();
    assert!(version.status.is_failed());
    assert_eq!(version.section, Section::Header);
    assert_eq!(version.offset, Some(format::offsets::VERSION));
}

#[test]
fn test_truncated_file_fails() {
    let data = valid_lcm();
    let report = validate_lcm(&data[..data.len() - 50], "short.lcm");
    assert!(report.has_failures());
    let trace = report.check("Trace size").unwrap();
    assert_eq!(trace.section, Section::Trace);
    assert_eq!(trace.offset, Some(format::HEADER_LEN + 2 * format::PEAK_RECORD_LEN));
}

#[test]
fn test_trailing_bytes_warn() {
    let mut data = valid_lcm();
    data.extend_from_slice(b"junk");
    let report = validate_lcm(&data, "junk.lcm");
    assert!(report.is_valid(), "{}", report);
    let size = report.check("File size").unwrap();
    assert!(matches!(&size.status, CheckStatus::Warning(msg) if msg.starts_with("4 ")));
    assert_eq!(size.offset, Some(data.len() - 4));
}

#[test]
fn test_bad_peak_fields_detected() {
    let mut data = valid_lcm();
    let second = format::offsets::PEAKS + format::PEAK_RECORD_LEN;
    LittleEndian::write_u16(&mut data[second..], 5);
    LittleEndian::write_f64(&mut data[second + 6..], -1.0);
    let report = validate_lcm(&data, "tampered.lcm");

    let numbering = report.check("Peak numbering").unwrap();
    assert!(numbering.status.is_failed());
    assert_eq!(numbering.offset, Some(second));
    let measurements = report.check("Areas and heights").unwrap();
    assert!(measurements.status.is_failed());
    assert_eq!(measurements.offset, Some(second + format::record::AREA));
    assert_eq!(report.first_failure(), Some(numbering));
}

#[test]
fn test_validate_file_from_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("SAMPLE_V.lcm");
    std::fs::write(&path, valid_lcm())?;

    let report = validate_lcm_file(&path)?;
    assert!(report.is_valid());
    assert!(report.source.ends_with("SAMPLE_V.lcm"));

    assert!(validate_lcm_file(&dir.path().join("missing.lcm")).is_err());
    Ok(())
}

#[test]
fn test_bad_trace_point_located() {
    let mut data = valid_lcm();
    let points = format::HEADER_LEN + 2 * format::PEAK_RECORD_LEN + format::TRACE_PREAMBLE_LEN;
    let tenth = points + 10 * format::TRACE_POINT_LEN;
    LittleEndian::write_f32(&mut data[tenth + 4..], -5.0);
    let report = validate_lcm(&data, "trace.lcm");

    let intensities = report.check("Trace intensities").unwrap();
    assert!(intensities.status.is_failed());
    assert_eq!(intensities.section, Section::Trace);
    assert_eq!(intensities.offset, Some(tenth + 4));
    assert!(report.check("Trace times").map_or(false, |c| c.status.is_ok()));
}
