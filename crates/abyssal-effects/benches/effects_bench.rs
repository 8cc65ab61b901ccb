//! Criterion benchmarks for abyssal stages
//!
//! Run with: cargo bench -p abyssal-effects
#![allow(missing_docs)]

use abyssal_core::{AudioBlock, ChannelLayout, ProcessSetup, Stage};
use abyssal_effects::{Corruption, Erosion, Obscura, Tremor, Void, Whispers};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_stage<S: Stage>(c: &mut Criterion, name: &str, mut stage: S, control: f32) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        stage.prepare(&ProcessSetup::new(SAMPLE_RATE, block_size, ChannelLayout::Stereo));

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    if let Some(mut block) = AudioBlock::stereo(&mut left, &mut right) {
                        stage.process_in_place(&mut block, black_box(control));
                    }
                    black_box(left[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_corruption(c: &mut Criterion) {
    bench_stage(c, "Corruption", Corruption::new(), 0.6);
}

fn bench_obscura(c: &mut Criterion) {
    bench_stage(c, "Obscura", Obscura::new(), 0.5);
}

fn bench_erosion(c: &mut Criterion) {
    bench_stage(c, "Erosion", Erosion::new(), 0.4);
}

fn bench_tremor(c: &mut Criterion) {
    bench_stage(c, "Tremor", Tremor::new(), 0.3);
}

fn bench_whispers(c: &mut Criterion) {
    bench_stage(c, "Whispers", Whispers::default(), 0.5);
}

fn bench_void(c: &mut Criterion) {
    bench_stage(c, "Void", Void::default(), 0.8);
}

criterion_group!(
    benches,
    bench_corruption,
    bench_obscura,
    bench_erosion,
    bench_tremor,
    bench_whispers,
    bench_void,
);
criterion_main!(benches);
