use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastout_core::{decode, testing::OutbBuilder};

/// Синтетический файл: `channels` каналов, `steps` шагов, пилообразные данные.
fn synthetic_outb(
    channels: usize,
    steps: usize,
) -> Vec<u8> {
    let mut b = OutbBuilder::with_time(1.0e4, 0.0).description("decode benchmark");
    for c in 0..channels {
        b = b.channel(&format!("Ch{c}"), "(-)", 100.0, 0.0);
    }

    let mut row = vec![0i16; channels];
    for t in 0..steps {
        for (c, v) in row.iter_mut().enumerate() {
            *v = ((t * 7 + c * 13) % 20_000) as i16 - 10_000;
        }
        b = b.row(Some((t * 125) as i32), &row);
    }

    b.build()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &(channels, steps) in &[(10usize, 10_000usize), (100, 10_000), (300, 24_000)] {
        let raw = synthetic_outb(channels, steps);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{channels}ch_{steps}steps")),
            &raw,
            |b, raw| b.iter(|| decode(Cursor::new(raw.as_slice())).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
