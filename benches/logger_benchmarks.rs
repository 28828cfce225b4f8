//! Criterion benchmarks for line composition and emission

use criterion::{criterion_group, criterion_main, Criterion};
use sitelog::prelude::*;
use std::hint::black_box;
use std::io;
use std::sync::Arc;

/// Discards everything; keeps sink cost out of composition benchmarks.
struct NullSink;

impl Sink for NullSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
}

fn bench_sync_emission(c: &mut Criterion) {
    let logger = Logger::new(Arc::new(NullSink), Level::Debug);
    logger.set_time_format("");
    logger.set_source_format("");
    c.bench_function("logln_sync_plain", |b| {
        b.iter(|| {
            logger
                .logln_sync(None, Level::Info, &[&black_box("payload")])
                .unwrap()
        })
    });

    let colorized = logger.with_color();
    colorized.set_time_format("%Y/%m/%d %H:%M:%S");
    c.bench_function("logln_sync_colorized_timestamped", |b| {
        b.iter(|| {
            colorized
                .logln_sync(None, Level::Info, &[&black_box("payload")])
                .unwrap()
        })
    });
}

fn bench_detached_emission(c: &mut Criterion) {
    let logger = Logger::new(Arc::new(NullSink), Level::Debug);
    logger.set_time_format("");
    logger.set_source_format("");
    c.bench_function("logf_detached", |b| {
        b.iter(|| logger.logf(None, Level::Info, format_args!("payload {}", black_box(1))))
    });
}

fn bench_source_capture(c: &mut Criterion) {
    c.bench_function("source_record_capture", |b| {
        b.iter(|| black_box(SourceRecord::capture(0)))
    });
}

fn bench_format_compile(c: &mut Criterion) {
    c.bench_function("source_format_compile", |b| {
        b.iter(|| {
            black_box(SourceFormat::compile(
                "%{package}/%{filename}:%{linenumber:05x}: %{receiver}.%{function}",
            ))
        })
    });
}

fn bench_colorize(c: &mut Criterion) {
    let spec = ColorSpec::new(Color::HOT_PINK, Color::TURQUOISE, Style::BOLD).unwrap();
    c.bench_function("colorspec_colorize", |b| {
        b.iter(|| black_box(spec.colorize(black_box("a message of typical length"))))
    });
}

criterion_group!(
    benches,
    bench_sync_emission,
    bench_detached_emission,
    bench_source_capture,
    bench_format_compile,
    bench_colorize
);
criterion_main!(benches);
