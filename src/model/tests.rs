use super::*;
use crate::config::Configuration;
use chrono::TimeZone;
use chrono::Utc;

fn two_peak_sample() -> Sample {
    SampleBuilder::new("Standard 01")
        .sample_id("S-001")
        .analyst("J. Analyst")
        .add_peak(Peak::new(2.345, 100.0, 10.0).with_name("Caffeine"))
        .add_peak(Peak::new(4.5, 300.0, 30.0))
        .analysis_date(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
        .build(&Configuration::default())
        .unwrap()
}

#[test]
fn test_builder_fills_derived_fields() {
    let sample = two_peak_sample();

    assert_eq!(sample.sample_id, "S-001");
    assert!(sample.peaks.iter().all(Peak::has_derived));
    assert!((sample.peaks[0].percent_area.unwrap() - 25.0).abs() < 1e-9);
    assert!((sample.peaks[1].percent_area.unwrap() - 75.0).abs() < 1e-9);
    assert!(!sample.report_generated);
    assert!(!sample.lcm_generated);
}

#[test]
fn test_generated_sample_id() {
    let id = Sample::generate_id();
    assert!(id.starts_with("SAMPLE_"));
    assert_eq!(id.len(), "SAMPLE_".len() + 13);
    assert_ne!(id, Sample::generate_id());

    let sample = SampleBuilder::new("Anonymous")
        .build(&Configuration::default())
        .unwrap();
    assert!(sample.sample_id.starts_with("SAMPLE_"));
}

#[test]
fn test_configuration_snapshot_is_frozen() {
    let mut live = Configuration::default();
    live.field_config.area_label = "Area (old)".to_string();

    let sample = SampleBuilder::new("Snapshot").build(&live).unwrap();
    live.field_config.area_label = "Area (new)".to_string();

    assert_eq!(sample.department_config.field_config.area_label, "Area (old)");
}

#[test]
fn test_invalid_retention_time_rejected() {
    let result = SampleBuilder::new("Bad")
        .add_peak(Peak::new(1.0, 10.0, 1.0))
        .add_peak(Peak::new(0.0, 10.0, 1.0))
        .build(&Configuration::default());

    match result {
        Err(ModelError::InvalidRetentionTime { number, value }) => {
            assert_eq!(number, 2);
            assert_eq!(value, 0.0);
        }
        other => panic!("expected InvalidRetentionTime, got {:?}", other),
    }
}

#[test]
fn test_negative_area_rejected() {
    let peak = Peak::new(1.0, -5.0, 1.0);
    assert!(matches!(
        peak.validate(1),
        Err(ModelError::InvalidMeasurement { field: "area", .. })
    ));

    let peak = Peak::new(1.0, 5.0, f64::NAN);
    assert!(matches!(
        peak.validate(3),
        Err(ModelError::InvalidMeasurement { number: 3, field: "height", .. })
    ));
}

#[test]
fn test_update_area_recomputes_sequence() {
    let mut sample = two_peak_sample();
    let tailing_before = sample.peaks[1].usp_tailing;

    assert!(sample.update_peak_area(0, 300.0));

    assert!((sample.peaks[0].percent_area.unwrap() - 50.0).abs() < 1e-9);
    assert!((sample.peaks[1].percent_area.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(sample.peaks[1].usp_tailing, tailing_before);
    assert!(!sample.update_peak_area(7, 1.0));
}

#[test]
fn test_record_export_flags() {
    let mut sample = two_peak_sample();
    sample.record_export(ExportKind::Lcm);
    assert!(sample.lcm_generated);
    assert!(!sample.report_generated);
    sample.record_export(ExportKind::Report);
    assert!(sample.report_generated);
}

#[test]
fn test_sample_json_roundtrip() {
    let mut sample = two_peak_sample();
    sample.metadata.vial_number = Some("3".to_string());
    sample.instrument_settings.column = Some("C18 150 x 4.6 mm".to_string());

    let json = sample.to_json().unwrap();
    assert!(json.contains("\"sampleId\": \"S-001\""));
    assert!(json.contains("\"vialNumber\": \"3\""));
    assert!(json.contains("\"departmentConfig\""));

    let restored = Sample::from_json(&json).unwrap();
    assert_eq!(restored, sample);
}

#[test]
fn test_sample_json_from_collaborator_record() {
    let json = r#"{
        "sampleId": "HPLC-42",
        "sampleName": "Assay",
        "analysisDate": "2023-05-22T13:25:43Z",
        "instrumentSettings": { "mobile_phase": "ACN:Water 60:40", "flow_rate": 1.0 },
        "peaks": [ { "retentionTime": 6.506, "area": 9855260, "height": 1056934 } ]
    }"#;

    let mut sample = Sample::from_json(json).unwrap();
    assert_eq!(
        sample.instrument_settings.mobile_phase.as_deref(),
        Some("ACN:Water 60:40")
    );
    assert_eq!(sample.instrument_settings.flow_rate, Some(1.0));
    assert_eq!(sample.department_config, Configuration::default());
    assert!(sample.peaks[0].percent_area.is_none());

    sample.fill_derived();
    assert_eq!(sample.peaks[0].percent_area, Some(100.0));
}

#[test]
fn test_missing_required_field_is_an_error() {
    let json = r#"{
        "sampleId": "HPLC-43",
        "sampleName": "Assay",
        "analysisDate": "2023-05-22T13:25:43Z",
        "peaks": [ { "retentionTime": 6.5, "area": 100 } ]
    }"#;
    assert!(matches!(Sample::from_json(json), Err(ModelError::JsonError(_))));
}

#[test]
fn test_max_retention_time() {
    let sample = two_peak_sample();
    assert_eq!(sample.max_retention_time(), Some(4.5));

    let empty = SampleBuilder::new("Empty").build(&Configuration::default()).unwrap();
    assert_eq!(empty.max_retention_time(), None);
}

#[test]
fn test_default_peak_name() {
    assert_eq!(Peak::new(1.0, 1.0, 1.0).name_or_default(4), "Peak_4");
    assert_eq!(Peak::new(1.0, 1.0, 1.0).with_name("").name_or_default(2), "Peak_2");
    assert_eq!(Peak::new(1.0, 1.0, 1.0).with_name("X").name_or_default(2), "X");
}
