//! Benchmark suite for map animation builds and playback
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tileanim_benches::{BenchHost, sizes, synthetic_animations};
use tileanim_engine::builder::MapAnimationBuilder;
use tileanim_types::{settings::Settings, tile::ProjectLimits};

/// Benchmark full-map builds with a cold metatile cache
fn bench_build_map(c: &mut Criterion) {
	let mut group = c.benchmark_group("build_map");
	let limits = ProjectLimits::default();
	let active = synthetic_animations();

	let cases = [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)];
	for (name, (width, height)) in cases {
		let mut host = BenchHost::generate(width, height, 40, 0x5EED);
		group.throughput(Throughput::Elements(u64::from(width * height)));
		let id = BenchmarkId::new("cold", name);
		group.bench_with_input(id, &(width, height), |b, &(width, height)| {
			b.iter(|| {
				let mut builder = MapAnimationBuilder::new(limits);
				builder.reset(limits, Some(active.clone()), width, height);
				black_box(builder.build_map(&mut host))
			});
		});
	}

	group.finish();
}

/// Benchmark per-tick show/hide work on a built map
fn bench_tick(c: &mut Criterion) {
	use tileanim_engine::scheduler::Scheduler;

	let mut group = c.benchmark_group("tick");
	let limits = ProjectLimits::default();
	let active = synthetic_animations();
	let cycle_length = active.cycle_length(&Settings::default());

	for (name, (width, height)) in [("small", sizes::SMALL), ("large", sizes::LARGE)] {
		let mut host = BenchHost::generate(width, height, 40, 0x5EED);
		let mut builder = MapAnimationBuilder::new(limits);
		builder.reset(limits, Some(active.clone()), width, height);
		builder.build_map(&mut host);

		let mut scheduler = Scheduler::new(cycle_length);
		scheduler.start();
		group.throughput(Throughput::Elements(cycle_length));
		group.bench_function(BenchmarkId::new("full_cycle", name), |b| {
			b.iter(|| {
				for _ in 0..cycle_length {
					scheduler.step(builder.index_mut(), &mut host);
				}
				black_box(scheduler.tick())
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_build_map, bench_tick);
criterion_main!(benches);
