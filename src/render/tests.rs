use chrono::{TimeZone, Utc};

use super::*;
use crate::config::Configuration;
use crate::model::{ModelError, Peak, Sample, SampleBuilder};

fn options() -> RenderOptions {
    RenderOptions::printed_at(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
}

fn sample(peaks: Vec<Peak>) -> Sample {
    SampleBuilder::new("Assay 7")
        .sample_id("SAMPLE_R1")
        .analyst("J. Doe")
        .analysis_date(Utc.with_ymd_and_hms(2024, 5, 30, 16, 0, 0).unwrap())
        .peaks(peaks)
        .build(&Configuration::default())
        .unwrap()
}

fn two_peaks() -> Sample {
    sample(vec![
        Peak::new(2.345, 1_245_678.0, 89_234.0).with_name("Caffeine"),
        Peak::new(4.1, 845_000.0, 61_000.0),
    ])
}

fn many_peaks(count: usize) -> Sample {
    sample(
        (1..=count)
            .map(|i| Peak::new(i as f64 * 0.25, 1_000.0 * i as f64, 100.0 * i as f64))
            .collect(),
    )
}

fn display(sample: &Sample, config: &Configuration) -> DisplayList {
    render_with(sample, config, &options(), DisplayList::new()).unwrap()
}

#[test]
fn test_render_is_idempotent() -> Result<(), RenderError> {
    let sample = two_peaks();
    let config = Configuration::default();
    let first = render_report(&sample, &config, &options())?;
    let second = render_report(&sample, &config, &options())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_only_printed_date_varies() {
    let sample = two_peaks();
    let config = Configuration::default();
    let later = RenderOptions::printed_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

    let a = display(&sample, &config);
    let b = render_with(&sample, &config, &later, DisplayList::new()).unwrap();

    let strip = |list: &DisplayList| -> Vec<DrawCommand> {
        list.pages()
            .iter()
            .flatten()
            .filter(|c| !matches!(c, DrawCommand::Text { text, .. } if text.starts_with("Date Printed")))
            .cloned()
            .collect()
    };
    assert_eq!(strip(&a), strip(&b));
    assert!(a.contains_text("Date Printed: 06/01/2024 08:30:00 AM UTC"));
}

#[test]
fn test_pdf_structure() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = render_report(&two_peaks(), &Configuration::default(), &options())?;
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let doc = lopdf::Document::load_mem(&bytes)?;
    assert_eq!(doc.get_pages().len(), 1);
    Ok(())
}

#[test]
fn test_sections_present_by_default() {
    let list = display(&two_peaks(), &Configuration::default());
    assert_eq!(list.pages().len(), 1);
    for heading in [
        "<Sample Information>",
        "<Chromatogram>",
        "<System Suitability>",
        "<Peak Table>",
    ] {
        assert!(list.contains_text(heading), "missing {}", heading);
    }
    assert!(list.contains_text("HPLC Analysis Report"));
    assert!(list.contains_text("Detector A 254nm"));
    assert!(list.contains_text("Caffeine - 2.345"));
    assert!(list.contains_text("Assay 7 - 1-1 - SAMPLE_R1.lcd"));
    assert!(list.contains_text("Page: 1 of 1"));
}

#[test]
fn test_sections_follow_template() {
    let mut config = Configuration::default();
    config.report_template.include_graph = false;
    config.report_template.include_peak_table = false;
    config.report_template.include_system_suitability = false;

    let list = display(&two_peaks(), &config);
    assert!(list.contains_text("<Sample Information>"));
    assert!(!list.contains_text("<Chromatogram>"));
    assert!(!list.contains_text("<Peak Table>"));
    assert!(!list.contains_text("<System Suitability>"));
    assert!(list.contains_text("Page: 1 of 1"));
}

#[test]
fn test_empty_sample_renders() -> Result<(), RenderError> {
    let sample = sample(vec![]);
    let list = display(&sample, &Configuration::default());

    assert!(list.contains_text("Total"));
    let curves = list
        .pages()
        .iter()
        .flatten()
        .filter(|c| matches!(c, DrawCommand::Path { points, .. } if points.len() > 2))
        .count();
    assert_eq!(curves, 0);

    let bytes = render_report(&sample, &Configuration::default(), &options())?;
    assert!(!bytes.is_empty());
    Ok(())
}

#[test]
fn test_long_table_paginates() {
    let sample = many_peaks(80);
    let config = Configuration::default();
    let layout = crate::layout::ReportLayout::compute(&sample, &config);
    let options = options();
    let plan = ReportRenderer::new(&layout, &options).plan();

    assert!(plan.page_count > 1);
    let mut expected_start = 0;
    for chunk in &plan.chunks {
        assert_eq!(chunk.rows.start, expected_start);
        expected_start = chunk.rows.end;
    }
    assert_eq!(expected_start, 81);

    let list = display(&sample, &config);
    assert_eq!(list.pages().len(), plan.page_count);
    let last = plan.page_count;
    assert!(list.contains_text(&format!("Page: 1 of {}", last)));
    assert!(list.contains_text(&format!("Page: {} of {}", last, last)));
    assert!(list.contains_text("<Peak Table> (continued)"));
    assert!(list.texts(last - 1).contains(&"Total"));
    assert!(list.texts(last - 1).contains(&"80"));
    // header row repeated on every table page
    for page in 1..last {
        assert!(list.texts(page).contains(&"Ret. Time"));
    }
}

#[test]
fn test_pdf_page_count_matches_plan() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = render_report(&many_peaks(80), &Configuration::default(), &options())?;
    let doc = lopdf::Document::load_mem(&bytes)?;
    let list = display(&many_peaks(80), &Configuration::default());
    assert_eq!(doc.get_pages().len(), list.pages().len());
    Ok(())
}

#[test]
fn test_invalid_sample_rejected() {
    let mut sample = two_peaks();
    sample.peaks[1].height = f64::NAN;
    let result = render_report(&sample, &Configuration::default(), &options());
    assert!(matches!(
        result,
        Err(RenderError::InvalidInput(ModelError::InvalidMeasurement { number: 2, .. }))
    ));
}

/// Surface that rejects paths, standing in for a broken backend
struct BrokenSurface(DisplayList);

impl DrawSurface for BrokenSurface {
    type Output = Vec<u8>;

    fn set_font(&mut self, font: Font, size: f64) -> Result<(), RenderError> {
        self.0.set_font(font, size)
    }

    fn set_gray(&mut self, level: f64) -> Result<(), RenderError> {
        self.0.set_gray(level)
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<(), RenderError> {
        self.0.text(x, y, text)
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64) -> Result<(), RenderError> {
        self.0.line(from, to, width)
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64) -> Result<(), RenderError> {
        self.0.rect(x, y, w, h, width)
    }

    fn polyline(&mut self, points: &[(f64, f64)], _width: f64) -> Result<(), RenderError> {
        if points.len() > 2 {
            return Err(RenderError::Surface("path rejected".to_string()));
        }
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.0.new_page()
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        Ok(vec![1, 2, 3])
    }
}

#[test]
fn test_surface_failure_aborts() {
    let result = render_with(
        &two_peaks(),
        &Configuration::default(),
        &options(),
        BrokenSurface(DisplayList::new()),
    );
    assert!(matches!(result, Err(RenderError::Surface(_))));
}

#[test]
fn test_text_width_scales() {
    let narrow = text_width("1.000", Font::Regular, 8.0);
    assert!(narrow > 0.0);
    assert!((text_width("1.000", Font::Regular, 16.0) - 2.0 * narrow).abs() < 1e-9);
    assert!(text_width("Total", Font::Bold, 8.0) > text_width("Total", Font::Regular, 8.0));
}
