//! Criterion benchmarks for the scroll hot path.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hairzone::prelude::*;

fn started() -> Controller {
    let mut c = Controller::default();
    c.bootstrap(&PageInventory::complete(16, 6, 4))
        .expect("bootstrap");
    c
}

/// Debounced pushes followed by a single settle.
fn bench_scroll_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_burst");

    for burst in [1usize, 10, 50, 200].iter() {
        group.throughput(Throughput::Elements(*burst as u64));
        group.bench_with_input(BenchmarkId::from_parameter(burst), burst, |b, &burst| {
            let mut controller = started();
            b.iter(|| {
                let mut last = None;
                for i in 0..burst {
                    for cmd in controller.handle(Event::Scroll {
                        offset: black_box(i as f64 * 7.0),
                    }) {
                        if let Command::ScheduleTimer { id, .. } = cmd {
                            last = Some(id);
                        }
                    }
                }
                if let Some(id) = last {
                    black_box(controller.handle(Event::TimerFired(id)));
                }
            });
        });
    }

    group.finish();
}

fn bench_intersections(c: &mut Criterion) {
    c.bench_function("intersection_repeat", |b| {
        let mut controller = started();
        b.iter(|| {
            for index in 0..16 {
                black_box(controller.handle(Event::Intersection {
                    index,
                    is_intersecting: true,
                }));
            }
        });
    });
}

criterion_group!(benches, bench_scroll_burst, bench_intersections);
criterion_main!(benches);
