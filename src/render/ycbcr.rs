// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::image::CHANNELS;

const CHROMA_OFFSET: f64 = 128.0;

fn to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Converts one full-range YCbCr sample to RGB, as defined by JFIF.
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = f64::from(y);
    let cb = f64::from(cb) - CHROMA_OFFSET;
    let cr = f64::from(cr) - CHROMA_OFFSET;
    [
        to_u8(cr.mul_add(1.402, y)),
        to_u8(cr.mul_add(-0.714136, cb.mul_add(-0.344136, y))),
        to_u8(cb.mul_add(1.772, y)),
    ]
}

/// Converts a row of samples into RGBA pixels with opaque alpha.
pub fn convert_row(row_y: &[u8], row_cb: &[u8], row_cr: &[u8], out: &mut [u8]) {
    assert!(row_y.len() == row_cb.len() && row_y.len() == row_cr.len());
    assert!(out.len() >= row_y.len() * CHANNELS);
    for (i, pixel) in out.chunks_exact_mut(CHANNELS).take(row_y.len()).enumerate() {
        let [r, g, b] = ycbcr_to_rgb(row_y[i], row_cb[i], row_cr[i]);
        pixel.copy_from_slice(&[r, g, b, u8::MAX]);
    }
}
