use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lcpeak::config::Configuration;
use lcpeak::lcm::{LcmReader, LcmWriter};
use lcpeak::model::{Peak, Sample, SampleBuilder};
use lcpeak::render::{render_report, RenderOptions};
use lcpeak::validator::validate_lcm;

/// Build a sample with evenly spread peaks
fn generate_sample(num_peaks: usize) -> Sample {
    let peaks = (0..num_peaks).map(|i| {
        let rt = 0.5 + i as f64 * 0.35;
        Peak::new(rt, 10_000.0 + (i % 17) as f64 * 3_500.0, 900.0 + (i % 11) as f64 * 120.0)
            .with_name(format!("Compound {}", i + 1))
    });

    SampleBuilder::new("Benchmark sample")
        .sample_id("SAMPLE_BENCH")
        .peaks(peaks)
        .analysis_date(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
        .build(&Configuration::default())
        .expect("valid benchmark sample")
}

/// Benchmark LCM encoding (trace synthesis dominates)
fn bench_lcm_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcm_encode");

    for num_peaks in [1, 10, 100] {
        let sample = generate_sample(num_peaks);
        group.throughput(Throughput::Elements(num_peaks as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}peaks", num_peaks)),
            &sample,
            |b, sample| {
                let writer = LcmWriter::new();
                b.iter(|| writer.encode(sample).expect("encode failed"));
            },
        );
    }

    group.finish();
}

/// Benchmark decoding and validating an encoded file
fn bench_lcm_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcm_read");

    for num_peaks in [10, 100] {
        let bytes = LcmWriter::new()
            .encode(&generate_sample(num_peaks))
            .expect("encode failed");
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("decode", num_peaks),
            &bytes,
            |b, bytes| {
                let reader = LcmReader::new();
                b.iter(|| reader.read(bytes).expect("decode failed"));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("validate", num_peaks),
            &bytes,
            |b, bytes| b.iter(|| validate_lcm(bytes, "bench.lcm")),
        );
    }

    group.finish();
}

/// Benchmark full PDF report rendering, including pagination
fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_report");
    group.sample_size(20);

    let options = RenderOptions::printed_at(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
    for num_peaks in [5, 80] {
        let sample = generate_sample(num_peaks);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}peaks", num_peaks)),
            &sample,
            |b, sample| {
                b.iter(|| {
                    render_report(sample, &sample.department_config, &options)
                        .expect("render failed")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_lcm_encode, bench_lcm_read, bench_report);
criterion_main!(benches);
