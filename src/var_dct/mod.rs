// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Inverse discrete cosine transform of 8x8 blocks.

pub mod dct_slow;
pub mod idct;

use crate::BLOCK_SIZE;

/// Offset that moves samples from the signed range around zero into 0..=255.
pub const LEVEL_SHIFT: f64 = 128.0;

/// Rounds transformed samples, shifts them into the unsigned range and
/// clamps them to 8 bits.
pub fn level_shift(samples: &[f64; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    samples.map(|s| (s.round() + LEVEL_SHIFT).clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn rounds_then_clamps() {
        let mut samples = [0.0; BLOCK_SIZE];
        samples[0] = -0.4;
        samples[1] = 0.5;
        samples[2] = -300.0;
        samples[3] = 127.6;
        samples[4] = -128.2;
        let shifted = level_shift(&samples);
        assert_eq!(shifted[..5], [128, 129, 0, 255, 0]);
        assert_eq!(shifted[5], 128);
    }
}
