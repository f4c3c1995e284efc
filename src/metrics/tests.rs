use super::*;
use crate::model::Peak;

fn peak(rt: f64, area: f64, height: f64) -> Peak {
    Peak::new(rt, area, height)
}

#[test]
fn test_plate_count_from_baseline_width() {
    let p = peak(2.0, 1000.0, 100.0).with_width(0.2);
    assert_eq!(usp_plate_count(&p), 1600.0);
}

#[test]
fn test_plate_count_assumed_width() {
    // W = tR / (2 * sqrt(10000)) makes the ratio constant
    assert_eq!(usp_plate_count(&peak(2.0, 1000.0, 100.0)), 640_000.0);
    assert_eq!(usp_plate_count(&peak(7.3, 1000.0, 100.0)), 640_000.0);
}

#[test]
fn test_plate_count_half_height() {
    let mut p = peak(2.0, 1000.0, 100.0);
    p.width_at_50 = Some(0.1);
    assert_eq!(usp_plate_count_half_height(&p), 2216.0);

    p.width_at_50 = None;
    assert_eq!(usp_plate_count_half_height(&p), 61.0);
}

#[test]
fn test_peak_characteristics_estimate() {
    let c = peak_characteristics(&peak(2.0, 1_000_000.0, 100_000.0));
    assert_eq!(c.usp_plate_count, 21_000.0);
    assert_eq!(c.usp_tailing, 1.001);
    assert_eq!(c.asymmetry, 1.01);
}

#[test]
fn test_efficiency_floor() {
    // area/height = 2_000_000 pushes efficiency below the 5000 floor
    let c = peak_characteristics(&peak(1.0, 2_000_000.0, 1.0));
    assert_eq!(c.usp_plate_count, 5_500.0);
}

#[test]
fn test_tailing_from_widths() {
    let mut p = peak(3.0, 1000.0, 100.0);
    p.width_at_5 = Some(0.3);
    p.front_width_at_5 = Some(0.1);
    assert_eq!(usp_tailing(&p), 1.5);

    p.front_width_at_5 = None;
    p.retention_time = 5.0;
    assert_eq!(usp_tailing(&p), 1.05);
}

#[test]
fn test_tailing_quality_proxy() {
    assert_eq!(usp_tailing(&peak(1.0, 100.0, 10.0)), 1.1);
    // very poor peak is clamped at +0.5
    assert_eq!(usp_tailing(&peak(1.0, 1_000_000.0, 1.0)), 1.5);
}

#[test]
fn test_zero_area_and_height_do_not_fail() {
    let no_height = peak(2.0, 500.0, 0.0);
    assert_eq!(peak_characteristics(&no_height).usp_plate_count, 0.0);
    assert_eq!(usp_tailing(&no_height), 1.5);

    let no_area = peak(2.0, 0.0, 50.0);
    assert_eq!(usp_tailing(&no_area), 1.0);
    assert_eq!(peak_characteristics(&no_area).usp_plate_count, 21_000.0);

    let nothing = peak(2.0, 0.0, 0.0);
    let c = peak_characteristics(&nothing);
    assert!(c.usp_plate_count.is_finite());
    assert!(c.usp_tailing.is_finite());
}

#[test]
fn test_zero_width_treated_as_missing() {
    let p = peak(2.0, 1000.0, 100.0).with_width(0.0);
    assert_eq!(usp_plate_count(&p), 640_000.0);
}

#[test]
fn test_percent_areas() {
    let mut peaks = vec![peak(1.0, 100.0, 10.0), peak(2.0, 300.0, 30.0)];
    compute_percent_areas(&mut peaks);
    assert_eq!(peaks[0].percent_area, Some(25.0));
    assert_eq!(peaks[1].percent_area, Some(75.0));
}

#[test]
fn test_percent_areas_zero_total() {
    let mut peaks = vec![peak(1.0, 0.0, 10.0), peak(2.0, 0.0, 30.0)];
    compute_percent_areas(&mut peaks);
    assert!(peaks.iter().all(|p| p.percent_area == Some(0.0)));

    let mut empty: Vec<Peak> = Vec::new();
    compute_percent_areas(&mut empty);
}

#[test]
fn test_resolution_and_asymmetry() {
    assert_eq!(resolution(&peak(2.0, 1.0, 1.0), &peak(3.0, 1.0, 1.0)), 20.0);
    assert_eq!(
        resolution(&peak(2.0, 1.0, 1.0).with_width(0.5), &peak(3.0, 1.0, 1.0).with_width(0.5)),
        2.0
    );
    assert_eq!(asymmetry(&peak(6.506, 1.0, 1.0)), 1.03);
}

#[test]
fn test_peak_capacity() {
    assert_eq!(peak_capacity(&[]), 0.0);
    assert_eq!(peak_capacity(&[peak(1.0, 1.0, 1.0)]), 1.0);
    assert_eq!(peak_capacity(&[peak(2.0, 1.0, 1.0), peak(4.0, 1.0, 1.0)]), 34.0);
}

#[test]
fn test_concentration_methods() {
    let peaks = vec![peak(2.345, 1_245_678.0, 89_234.0), peak(3.0, 500_000.0, 1.0)];
    let options = ConcentrationOptions::default();
    assert_eq!(concentration(&peaks[0], &peaks, &options), 1.246);

    let internal = ConcentrationOptions {
        internal_standard_area: Some(500_000.0),
        calibration_factor: 2.0,
        ..Default::default()
    };
    assert!((concentration(&peaks[0], &peaks, &internal) - 4.982712).abs() < 1e-12);

    let by_index = ConcentrationOptions {
        internal_standard_index: Some(1),
        ..Default::default()
    };
    assert!((concentration(&peaks[0], &peaks, &by_index) - 2.491356).abs() < 1e-12);
}

#[test]
fn test_authoritative_concentration_wins() {
    let p = peak(2.0, 1_000_000.0, 1.0).with_concentration(12.5, "ppm");
    let options = ConcentrationOptions {
        internal_standard_area: Some(10.0),
        ..Default::default()
    };
    assert_eq!(concentration(&p, &[], &options), 12.5);
}

#[test]
fn test_derive_all_prefers_measured_widths() {
    let mut peaks = vec![
        peak(2.0, 1000.0, 100.0).with_width(0.2),
        peak(3.0, 1000.0, 100.0),
    ];
    peaks[1].width_at_50 = Some(0.1);
    derive_all(&mut peaks);

    assert_eq!(peaks[0].usp_plate_count, Some(1600.0));
    assert_eq!(peaks[1].usp_plate_count, Some(4986.0));
    assert!(peaks.iter().all(Peak::has_derived));
}

#[test]
fn test_system_suitability_summary() {
    let peaks = vec![
        peak(4.0, 1000.0, 100.0),
        peak(2.0, 1000.0, 100.0),
        peak(2.5, 1000.0, 100.0),
    ];
    let summary = system_suitability(&peaks);

    // neighbours by retention time: (2.0, 2.5) and (2.5, 4.0)
    assert_eq!(summary.resolution, Some(11.11));
    assert!(summary.efficiency.unwrap() > 0.0);
    assert_eq!(summary.tailing, Some(1.032));
    assert_eq!(summary.asymmetry, Some(1.02));

    assert_eq!(system_suitability(&[]), SuitabilitySummary::default());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn usp_metrics_are_finite_and_pure(
            rt in 0.01f64..120.0,
            area in 0.0f64..1e9,
            height in 0.0f64..1e8,
        ) {
            let p = peak(rt, area, height);
            let plates = derived_plate_count(&p);
            let tailing = usp_tailing(&p);
            prop_assert!(plates.is_finite());
            prop_assert!(tailing.is_finite());
            prop_assert_eq!(plates, derived_plate_count(&p));
            prop_assert_eq!(tailing, usp_tailing(&p));
            prop_assert!((1.0..=1.5).contains(&tailing));
        }

        #[test]
        fn percent_areas_sum_to_hundred(areas in prop::collection::vec(0.0f64..1e7, 1..30)) {
            let mut peaks: Vec<Peak> = areas
                .iter()
                .enumerate()
                .map(|(i, a)| peak(i as f64 + 1.0, *a, 1.0))
                .collect();
            compute_percent_areas(&mut peaks);
            let sum: f64 = peaks.iter().map(|p| p.percent_area.unwrap()).sum();
            if areas.iter().sum::<f64>() > 0.0 {
                prop_assert!((sum - 100.0).abs() < 1e-6);
            } else {
                prop_assert_eq!(sum, 0.0);
            }
        }
    }
}
