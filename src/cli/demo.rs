use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use log::info;
use std::path::PathBuf;

use lcpeak::config::Configuration;
use lcpeak::export::{lcm_artifact, report_artifact};
use lcpeak::model::{
    ExportKind, InstrumentSettings, Peak, ReportMetadata, Sample, SampleBuilder,
    SystemSuitability,
};
use lcpeak::render::RenderOptions;

use super::write_atomic;

/// Write a demo sample record with its LCM file and report
pub fn run(output: PathBuf) -> Result<()> {
    info!("lcpeak demo");

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let mut sample = build_demo_sample()?;
    info!(
        "Built demo sample {} with {} peaks",
        sample.sample_id,
        sample.peaks.len()
    );

    let lcm = lcm_artifact(&sample).context("LCM export failed")?;
    let lcm_path = lcm.write_to_dir(&output)?;
    sample.record_export(ExportKind::Lcm);

    let report = report_artifact(&sample, &RenderOptions::default())
        .context("Report generation failed")?;
    let report_path = report.write_to_dir(&output)?;
    sample.record_export(ExportKind::Report);

    let json_path = output.join(format!("{}.json", sample.sample_id));
    write_atomic(&json_path, sample.to_json()?.as_bytes())?;

    println!("Demo sample written to {}", output.display());
    println!("  Sample record: {}", json_path.display());
    println!("  LCM file:      {} ({} bytes)", lcm_path.display(), lcm.bytes.len());
    println!("  Report:        {} ({} bytes)", report_path.display(), report.bytes.len());

    Ok(())
}

/// A caffeine/theobromine assay with an internal standard
fn build_demo_sample() -> Result<Sample> {
    let acquired = Utc
        .with_ymd_and_hms(2024, 3, 14, 9, 26, 53)
        .single()
        .context("Invalid demo acquisition date")?;

    let peaks = vec![
        Peak::new(1.842, 152_340.5, 18_220.4).with_name("Theobromine"),
        Peak::new(2.517, 48_112.0, 5_104.9).with_name("Theophylline"),
        Peak::new(3.904, 1_204_556.2, 98_410.7)
            .with_name("Caffeine")
            .with_concentration(0.251, "mg/mL")
            .with_width(0.142),
        Peak::new(5.266, 310_882.9, 24_960.3)
            .with_name("Internal Standard")
            .with_mark("IS"),
    ];

    let metadata = ReportMetadata {
        project_name: Some("Beverage QC".to_string()),
        report_method_id: Some("RM-CAF-01".to_string()),
        reported_by: Some("Demo Analyst".to_string()),
        sample_set_name: Some("Demo Set".to_string()),
        sample_type: Some("Unknown".to_string()),
        vial_number: Some("12".to_string()),
        date_acquired: Some(acquired),
        acquired_by: Some("Demo Analyst".to_string()),
        data_filename: Some("caffeine_demo.dat".to_string()),
        method_filename: Some("caffeine_assay.met".to_string()),
        processing_method: Some("Caffeine Assay".to_string()),
        run_time: Some(7.0),
        injection_number: Some(1),
        ..Default::default()
    };

    let sample = SampleBuilder::new("Cold Brew Lot 0315")
        .analyst("Demo Analyst")
        .department("Quality Control")
        .peaks(peaks)
        .instrument_settings(InstrumentSettings {
            column: Some("C18, 4.6 x 150 mm, 5 um".to_string()),
            mobile_phase: Some("Water/Methanol 70:30".to_string()),
            flow_rate: Some(1.0),
            injection_volume: Some(10.0),
            detection_wavelength: Some(273.0),
            temperature: Some(30.0),
        })
        .system_suitability(SystemSuitability {
            repeatability: Some(0.42),
            ..Default::default()
        })
        .metadata(metadata)
        .analysis_date(acquired)
        .build(&Configuration::default())?;

    Ok(sample)
}
