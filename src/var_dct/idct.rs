// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::PI;

use super::dct_slow::alpha;
use crate::{BLOCK_DIM, BLOCK_SIZE};

/// Separable 8x8 inverse DCT: a 1D transform over the rows, then over the
/// columns, with the cosine basis computed once.
#[derive(Debug, Clone)]
pub struct InverseDct {
    /// `basis[x][u]` is `C(u) / 2 * cos((2x + 1) u pi / 16)`.
    basis: [[f64; BLOCK_DIM]; BLOCK_DIM],
}

impl Default for InverseDct {
    fn default() -> Self {
        InverseDct::new()
    }
}

impl InverseDct {
    pub fn new() -> InverseDct {
        let basis = array_init::array_init(|x| {
            array_init::array_init(|u| {
                alpha(u) / 2.0 * ((2 * x + 1) as f64 * u as f64 * PI / 16.0).cos()
            })
        });
        InverseDct { basis }
    }

    fn idct1d(&self, input: &[f64], out: &mut [f64]) {
        for (x, sample) in out.iter_mut().enumerate() {
            *sample = self.basis[x]
                .iter()
                .zip(input)
                .map(|(basis, coefficient)| basis * coefficient)
                .sum();
        }
    }

    /// Same result as [`super::dct_slow::idct2d`], up to rounding.
    pub fn transform(&self, coefficients: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
        let mut rows = [0.0; BLOCK_SIZE];
        for (input, out) in coefficients
            .chunks_exact(BLOCK_DIM)
            .zip(rows.chunks_exact_mut(BLOCK_DIM))
        {
            self.idct1d(input, out);
        }

        let mut out = [0.0; BLOCK_SIZE];
        let mut column = [0.0; BLOCK_DIM];
        let mut samples = [0.0; BLOCK_DIM];
        for x in 0..BLOCK_DIM {
            for (v, c) in column.iter_mut().enumerate() {
                *c = rows[v * BLOCK_DIM + x];
            }
            self.idct1d(&column, &mut samples);
            for (y, &s) in samples.iter().enumerate() {
                out[y * BLOCK_DIM + x] = s;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use test_log::test;

    use super::*;
    use crate::util::test::assert_all_almost_eq;
    use crate::var_dct::dct_slow::idct2d;

    #[test]
    fn matches_direct_summation() {
        let idct = InverseDct::new();
        let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(0);
        for _ in 0..100 {
            let coefficients: [f64; BLOCK_SIZE] =
                std::array::from_fn(|_| rng.random_range(-1024..=1023) as f64);
            assert_all_almost_eq!(idct.transform(&coefficients), idct2d(&coefficients), 1e-9);
        }
    }

    #[test]
    fn matches_direct_summation_on_sparse_blocks() {
        let idct = InverseDct::new();
        arbtest::arbtest(|u| {
            let mut coefficients = [0.0; BLOCK_SIZE];
            for _ in 0..u.int_in_range(0..=4)? {
                let position = u.choose_index(BLOCK_SIZE)?;
                coefficients[position] = f64::from(u.int_in_range(-2047i32..=2047)?);
            }
            assert_all_almost_eq!(idct.transform(&coefficients), idct2d(&coefficients), 1e-9);
            Ok(())
        });
    }
}
