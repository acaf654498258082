//! Engine benchmarks: single validation and batch throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use toets_core::config::EngineConfig;
use toets_core::types::ValidationRequest;
use toets_engine::orchestrator::ValidationOrchestrator;

const DEFINITIE: &str = "Een hypotheek is een beperkt recht op een registergoed dat strekt \
     tot zekerheid voor de voldoening van een geldvordering.";

fn bench_validate_text(c: &mut Criterion) {
    toets_core::observability::init_tracing();
    let orchestrator = ValidationOrchestrator::new(EngineConfig::default()).unwrap();
    c.bench_function("validate_text", |b| {
        b.iter(|| {
            orchestrator.validate_text(
                black_box("hypotheek"),
                black_box(DEFINITIE),
                None,
                None,
            )
        })
    });
}

fn bench_batch_validate(c: &mut Criterion) {
    let orchestrator = ValidationOrchestrator::new(EngineConfig::default()).unwrap();
    let requests: Vec<ValidationRequest> = (0..100)
        .map(|_| ValidationRequest::new("hypotheek", DEFINITIE))
        .collect();
    c.bench_function("batch_validate_100", |b| {
        b.iter(|| orchestrator.batch_validate(black_box(&requests), None))
    });
}

fn bench_parallel_rules(c: &mut Criterion) {
    let config = EngineConfig::from_toml(
        r#"
[execution]
parallel_rules = true
"#,
    )
    .unwrap();
    let orchestrator = ValidationOrchestrator::new(config).unwrap();
    c.bench_function("validate_text_parallel_rules", |b| {
        b.iter(|| {
            orchestrator.validate_text(
                black_box("hypotheek"),
                black_box(DEFINITIE),
                None,
                None,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_validate_text,
    bench_batch_validate,
    bench_parallel_rules
);
criterion_main!(benches);
