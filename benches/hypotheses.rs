//! Benchmarks for hypothesis generation and the in-process setup run.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use cluedo_setup::config::SetupConfig;
use cluedo_setup::models::{Catalogs, Directive, DirectiveResponse, HYPOTHESIS_TEMPLATES};
use cluedo_setup::reasoner::ReasoningService;
use cluedo_setup::{GameSetup, HypothesisGenerator, MemoryParameterStore, Result};

/// Service that accepts everything without doing any work.
struct NullService;

impl ReasoningService for NullService {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn execute(&self, _directive: &Directive) -> Result<DirectiveResponse> {
        Ok(DirectiveResponse::ok())
    }
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypotheses");
    group.measurement_time(Duration::from_secs(5));

    let mut generator = HypothesisGenerator::from_seed(Catalogs::default(), 42);

    group.bench_function("generate_all", |b| {
        b.iter(|| black_box(generator.generate().unwrap()));
    });

    group.bench_function("sample_contradictory", |b| {
        let template = &HYPOTHESIS_TEMPLATES[9];
        b.iter(|| black_box(generator.sample(black_box(template)).unwrap()));
    });

    group.finish();
}

fn bench_setup_run(c: &mut Criterion) {
    let config = SetupConfig::default().with_seed(42);

    c.bench_function("setup_run_null_service", |b| {
        b.iter(|| {
            let store = Arc::new(MemoryParameterStore::new());
            let mut setup = GameSetup::new(&config, Arc::new(NullService), store);
            black_box(setup.run().unwrap())
        });
    });
}

criterion_group!(benches, bench_generation, bench_setup_run);
criterion_main!(benches);
