use criterion::{criterion_group, criterion_main, Criterion};
use managed_gauges::encoding::text::encode;
use managed_gauges::gauge::{ConstGauge, Gauge};
use managed_gauges::lifecycle::Container;
use managed_gauges::managed;
use managed_gauges::registrar::GaugeRegistrar;
use managed_gauges::registry::Registry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Pool {
    active: AtomicU64,
}

#[managed]
impl Pool {
    #[gauge]
    fn active(&self) -> u64 {
        self.active.load(Ordering::Relaxed)
    }
}

pub fn gauge(c: &mut Criterion) {
    c.bench_function("const gauge", |b| {
        let gauge = ConstGauge::new(42u64);

        b.iter(|| gauge.value())
    });

    c.bench_function("method gauge", |b| {
        let registry = Arc::new(Registry::default());
        let mut container = Container::default();
        container.add_post_processor(GaugeRegistrar::post_processor(registry.clone()));
        container.register("pool", Pool::default()).unwrap();
        let gauge = registry.get("Pool.active").unwrap();

        b.iter(|| gauge.value())
    });

    c.bench_function("encode 100 gauges", |b| {
        let registry = Registry::default();
        for i in 0..100u64 {
            registry
                .register(format!("app.gauge_{i}"), ConstGauge::new(i))
                .unwrap();
        }
        let mut buffer = String::new();

        b.iter(|| {
            buffer.clear();
            encode(&mut buffer, &registry).unwrap();
        })
    });
}

criterion_group!(benches, gauge);
criterion_main!(benches);
