// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;

use crate::{BLOCK_DIM, BLOCK_SIZE};

#[inline(always)]
pub(super) fn alpha(u: usize) -> f64 {
    if u == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Reference 2D inverse DCT of an 8x8 block, summing all 64 terms for each
/// sample. Coefficients are in natural order, row `v` holding vertical
/// frequency `v`.
pub fn idct2d(coefficients: &[f64; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
    let mut out = [0.0; BLOCK_SIZE];
    for (i, sample) in out.iter_mut().enumerate() {
        let (x, y) = ((i % BLOCK_DIM) as f64, (i / BLOCK_DIM) as f64);
        let mut sum = 0.0;
        for (j, &coefficient) in coefficients.iter().enumerate() {
            let (u, v) = (j % BLOCK_DIM, j / BLOCK_DIM);
            sum += alpha(u)
                * alpha(v)
                * coefficient
                * ((2.0 * x + 1.0) * u as f64 * PI / 16.0).cos()
                * ((2.0 * y + 1.0) * v as f64 * PI / 16.0).cos();
        }
        *sample = sum / 4.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use super::*;
    use crate::util::test::assert_all_almost_eq;

    #[test]
    fn dc_only_is_flat() {
        let mut coefficients = [0.0; BLOCK_SIZE];
        coefficients[0] = 80.0;
        assert_all_almost_eq!(idct2d(&coefficients), [10.0; BLOCK_SIZE], 1e-9);
    }

    #[test]
    fn first_horizontal_frequency() {
        let mut coefficients = [0.0; BLOCK_SIZE];
        coefficients[1] = 100.0;
        let out = idct2d(&coefficients);
        // Only u = 1 contributes: 100 * C(0) * C(1) / 4 * cos((2x + 1) pi / 16).
        let expected: [f64; BLOCK_DIM] = std::array::from_fn(|x| {
            100.0 / 4.0 * FRAC_1_SQRT_2 * ((2 * x + 1) as f64 * PI / 16.0).cos()
        });
        assert_all_almost_eq!(
            expected[..4],
            [17.337998, 14.698445, 9.821187, 3.448742],
            1e-6
        );
        for row in out.chunks_exact(BLOCK_DIM) {
            assert_all_almost_eq!(row, expected, 1e-7);
        }
    }

    #[test]
    fn vertical_frequency_varies_by_row() {
        let mut coefficients = [0.0; BLOCK_SIZE];
        coefficients[BLOCK_DIM] = 100.0;
        let out = idct2d(&coefficients);
        for (y, row) in out.chunks_exact(BLOCK_DIM).enumerate() {
            let expected = [row[0]; BLOCK_DIM];
            assert_all_almost_eq!(row, expected, 1e-9);
            assert_eq!(row[0] > 0.0, y < 4);
        }
    }
}
