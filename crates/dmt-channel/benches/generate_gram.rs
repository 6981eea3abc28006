use criterion::{criterion_group, criterion_main, Criterion};
use dmt_channel::{build_gram, generate_channel, ChannelModel};
use dmt_core::RngHandle;

fn bench_generate_gram(c: &mut Criterion) {
    c.bench_function("generate_8x8_and_gram", |b| {
        let mut rng = RngHandle::from_seed(4001);
        b.iter(|| {
            let h = generate_channel(8, 8, ChannelModel::Rayleigh, &mut rng).expect("channel");
            build_gram(&h)
        });
    });
}

criterion_group!(benches, bench_generate_gram);
criterion_main!(benches);
