//! # Metric Animation Benchmark
//!
//! A page pass parses every metric display and ticks each one per frame.
//! Both must stay far below a 16ms frame budget.
//!
//! Run with: `cargo bench --package deck_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deck_core::{Easing, MetricAnimation, MetricSpec};

/// Representative metric texts from a results slide.
const METRICS: [&str; 8] = ["42%", "$3.2M", "4.5:1", "0.857", "120", "$1,250,000", "87.3%", "0.92"];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_metrics", |b| {
        b.iter(|| {
            for text in METRICS {
                black_box(MetricSpec::parse(black_box(text)));
            }
        });
    });
}

fn bench_full_animation(c: &mut Criterion) {
    c.bench_function("animate_metrics_60fps", |b| {
        b.iter(|| {
            let mut anims: Vec<_> = METRICS
                .iter()
                .filter_map(|text| {
                    MetricAnimation::start(MetricSpec::parse(text), 0.0, 2000.0, Easing::QuarticOut)
                })
                .collect();

            let mut now = 0.0;
            while anims.iter().any(|a| !a.is_complete()) {
                for anim in &mut anims {
                    black_box(anim.tick(now));
                }
                now += 16.0;
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_full_animation);
criterion_main!(benches);
