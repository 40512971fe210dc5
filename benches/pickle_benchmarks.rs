//! Pickle benchmarks
//!
//! Runs every registry entry for each compiled pickler at the highest
//! protocol. Throughput is reported per library call.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pickle_bench::prelude::*;

fn bench_picklers(c: &mut Criterion) {
    let available = Availability::compiled();
    let modes = [(false, available.accelerated), (true, available.reference)];

    for (reference, compiled) in modes {
        if !compiled {
            continue;
        }
        let pickler = select_pickler(reference, available).unwrap();
        let workload =
            Workload::prepare(pickler.as_ref(), Fixtures::default(), Protocol::HIGHEST).unwrap();

        let mut group = c.benchmark_group(pickler.name());
        for spec in &BENCHMARKS {
            group.throughput(Throughput::Elements(u64::from(spec.inner_loops)));
            group.bench_function(spec.name.as_str(), |b| {
                b.iter_custom(|iters| (spec.func)(iters, pickler.as_ref(), &workload).unwrap());
            });
        }
        group.finish();
    }
}

/// Compare the cost of every protocol for the profile record
fn bench_protocols(c: &mut Criterion) {
    let pickler = select_pickler(false, Availability::compiled()).unwrap();
    let fixtures = Fixtures::default();

    let mut group = c.benchmark_group("protocols");
    for protocol in Protocol::all() {
        let workload = Workload::prepare(pickler.as_ref(), fixtures.clone(), protocol).unwrap();
        let spec = lookup(BenchmarkName::Pickle);
        group.bench_function(format!("pickle_protocol_{protocol}"), |b| {
            b.iter_custom(|iters| (spec.func)(iters, pickler.as_ref(), &workload).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_picklers, bench_protocols);
criterion_main!(benches);
