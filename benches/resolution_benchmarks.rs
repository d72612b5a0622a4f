use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use composite_provider::{Capabilities, SecurityProvider, Service, StaticHost};
use std::sync::Arc;

fn host() -> Arc<StaticHost> {
    let mut host = StaticHost::new();
    for i in 0..256 {
        host.install(Service::new(
            "Bench",
            "Signature",
            &format!("SIG{}", i),
            "bench::Signature",
        ));
    }
    Arc::new(host)
}

fn benchmark_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_service");

    let modes = [
        ("cached", Capabilities::standard()),
        ("uncached", Capabilities::standard().with_shared_mutable_cache(false)),
    ];

    for (label, capabilities) in modes {
        let provider = SecurityProvider::new(host(), capabilities).unwrap();

        for (case, kind, algorithm) in [
            ("alias", "Signature", "CompositeSignature"),
            ("host_hit", "Signature", "SIG128"),
            ("miss", "Signature", "NoSuchAlgorithm"),
        ] {
            group.bench_with_input(BenchmarkId::new(label, case), &algorithm, |b, algorithm| {
                b.iter(|| black_box(provider.get_service(kind, algorithm)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_lookup);
criterion_main!(benches);
