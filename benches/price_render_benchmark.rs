use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use desert_retreat::{
    Currency, FlowConfig, FlowController, ImmediateGateway, MemorySessionStorage, PriceTag,
    RecordingHost, RecordingNotifier,
};
use rand::{thread_rng, Rng};
use std::sync::Arc;

// Currency switches re-render every priced node on the page
pub fn price_render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("currency_switch");

    for tag_count in [10, 100, 1000].iter() {
        let mut rng = thread_rng();
        let tags = (0..*tag_count)
            .map(|i| PriceTag {
                id: format!("item{}", i),
                inr: rng.gen_range(500..200_000),
                usd: rng.gen_range(5..2_500),
                per_night: rng.gen_bool(0.4),
            })
            .collect::<Vec<_>>();

        let flow = FlowController::new(
            FlowConfig::instant(),
            Arc::new(RecordingHost::with_price_tags(tags)),
            Arc::new(RecordingNotifier::new()),
            Arc::new(ImmediateGateway::new()),
            Arc::new(MemorySessionStorage::new()),
        );
        flow.book_accommodation("Desert Camp", 5000, 60).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(tag_count),
            tag_count,
            |b, _| {
                let mut usd = false;
                b.iter(|| {
                    usd = !usd;
                    let currency = if usd { Currency::Usd } else { Currency::Inr };
                    black_box(flow.set_currency(currency))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, price_render_benchmark);
criterion_main!(benches);
