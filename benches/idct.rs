// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use baseline_jpeg::decode;
use baseline_jpeg::var_dct::dct_slow;
use baseline_jpeg::var_dct::idct::InverseDct;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jpeg_test_utils::{BitWriter, BlockEncoder, HuffmanSpec, JpegWriter};

fn coefficients() -> [f64; 64] {
    std::array::from_fn(|i| ((i * 37 % 17) as f64 - 8.0) * 4.0)
}

fn bench_idct(c: &mut Criterion) {
    let mut group = c.benchmark_group("idct");
    let block = coefficients();
    group.bench_function("direct", |b| b.iter(|| dct_slow::idct2d(&block)));
    let idct = InverseDct::new();
    group.bench_function("separable", |b| b.iter(|| idct.transform(&block)));
    group.finish();
}

/// A 4:2:0 image of `mcus` x `mcus` MCUs, every block carrying AC data.
fn color_file(mcus: u16) -> Vec<u8> {
    let (dc, ac) = (HuffmanSpec::dc(), HuffmanSpec::ac());
    let encoder = BlockEncoder::new(&dc, &ac);
    let mut zigzag = [0; 64];
    for (i, c) in zigzag.iter_mut().enumerate().take(16) {
        *c = (i as i32 % 7) - 3;
    }
    let mut writer = BitWriter::new();
    let mut predictors = [0; 3];
    for _ in 0..u32::from(mcus) * u32::from(mcus) {
        for (component, blocks) in [(0, 4), (1, 1), (2, 1)] {
            for _ in 0..blocks {
                encoder.encode(&mut writer, &zigzag, &mut predictors[component]);
            }
        }
    }
    JpegWriter::new()
        .quantization_table(0, &[2; 64])
        .huffman_table(0, 0, &dc)
        .huffman_table(1, 0, &ac)
        .frame(mcus * 16, mcus * 16, &[(1, 2, 2, 0), (2, 1, 1, 0), (3, 1, 1, 0)])
        .scan(&[(1, 0, 0), (2, 0, 0), (3, 0, 0)], &writer.finish())
        .finish()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for mcus in [4, 16, 32] {
        let file = color_file(mcus);
        let id = BenchmarkId::new("ycbcr420", format_args!("{0}x{0}", mcus * 16));
        group.bench_function(id, |b| b.iter(|| decode(&file)));
    }
    group.finish();
}

criterion_group!(benches, bench_idct, bench_decode);
criterion_main!(benches);
