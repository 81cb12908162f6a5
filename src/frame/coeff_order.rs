// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::BLOCK_SIZE;

/// Natural (row-major) position of each coefficient in zig-zag order.
#[rustfmt::skip]
pub const ZIGZAG_TO_NATURAL: [usize; BLOCK_SIZE] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Zig-zag position of each coefficient in natural order.
pub const NATURAL_TO_ZIGZAG: [usize; BLOCK_SIZE] = {
    let mut inverse = [0; BLOCK_SIZE];
    let mut i = 0;
    while i < BLOCK_SIZE {
        inverse[ZIGZAG_TO_NATURAL[i]] = i;
        i += 1;
    }
    inverse
};

/// Reorders coefficients from zig-zag order into natural order.
pub fn to_natural_order<T: Copy + Default>(zigzag: &[T; BLOCK_SIZE]) -> [T; BLOCK_SIZE] {
    let mut natural = [T::default(); BLOCK_SIZE];
    for (&value, &position) in zigzag.iter().zip(ZIGZAG_TO_NATURAL.iter()) {
        natural[position] = value;
    }
    natural
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::BLOCK_DIM;

    /// Computes the zig-zag order by walking the anti-diagonals of the block,
    /// alternating direction.
    fn natural_coeff_order() -> [usize; BLOCK_SIZE] {
        let mut out = [0; BLOCK_SIZE];
        let mut cur = 0;
        // Upper-left half, including the main anti-diagonal.
        for i in 0..BLOCK_DIM {
            for j in 0..(i + 1) {
                let mut x = j;
                let mut y = i - j;
                if i % 2 != 0 {
                    std::mem::swap(&mut x, &mut y);
                }
                out[cur] = y * BLOCK_DIM + x;
                cur += 1;
            }
        }
        // Lower-right half
        for i in (0..BLOCK_DIM - 1).rev() {
            for j in 0..(i + 1) {
                let mut x = BLOCK_DIM - 1 - (i - j);
                let mut y = BLOCK_DIM - 1 - j;
                if i % 2 != 0 {
                    std::mem::swap(&mut x, &mut y);
                }
                out[cur] = y * BLOCK_DIM + x;
                cur += 1;
            }
        }
        out
    }

    #[test]
    fn table_matches_diagonal_walk() {
        assert_eq!(natural_coeff_order(), ZIGZAG_TO_NATURAL);
    }

    #[test]
    fn inverse_table() {
        for (zigzag, &natural) in ZIGZAG_TO_NATURAL.iter().enumerate() {
            assert_eq!(NATURAL_TO_ZIGZAG[natural], zigzag);
        }
    }

    #[test]
    fn reorder() {
        let zigzag: [usize; BLOCK_SIZE] = std::array::from_fn(|i| i);
        let natural = to_natural_order(&zigzag);
        assert_eq!(natural, NATURAL_TO_ZIGZAG);
        // Second row starts with the third zig-zag coefficient.
        assert_eq!(natural[BLOCK_DIM], 2);
    }
}
