// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Assembly of decoded component planes into the output raster.

pub mod ycbcr;

use crate::error::Result;
use crate::headers::{ComponentRole, FrameHeader};
use crate::image::{Raster, SamplePlane};
use crate::util::tracing_wrappers::*;

/// Value used for a component the frame does not have.
const NEUTRAL_SAMPLE: u8 = 128;

/// Fills one output row with the samples of `plane` covering it. Planes of
/// subsampled components are upsampled by repeating samples.
fn upsample_row(
    plane: &SamplePlane,
    factors: (usize, usize),
    max_factors: (usize, usize),
    y: usize,
    out: &mut [u8],
) {
    let row = plane.row(y * factors.1 / max_factors.1);
    if factors.0 == max_factors.0 {
        out.copy_from_slice(&row[..out.len()]);
        return;
    }
    for (x, sample) in out.iter_mut().enumerate() {
        *sample = row[x * factors.0 / max_factors.0];
    }
}

/// Converts the decoded planes, one per frame component in declaration
/// order, to an RGBA raster padded to whole blocks.
pub fn composite(header: &FrameHeader, planes: &[SamplePlane]) -> Result<Raster> {
    let size = header.padded_size();
    let max_factors = header.max_sampling_factors();
    debug!(?size, ?max_factors, "compositing");
    let mut raster = Raster::new(size, (header.width.into(), header.height.into()))?;

    let channel = |role: ComponentRole| {
        let index = header.role_index(role)?;
        let c = &header.components[index];
        let factors = (
            usize::from(c.sampling_factor_horizontal),
            usize::from(c.sampling_factor_vertical),
        );
        planes.get(index).map(|plane| (plane, factors))
    };
    let channels = [
        channel(ComponentRole::Luminance),
        channel(ComponentRole::ChrominanceBlue),
        channel(ComponentRole::ChrominanceRed),
    ];

    let mut rows = [vec![0; size.0], vec![0; size.0], vec![0; size.0]];
    for y in 0..size.1 {
        for (row, channel) in rows.iter_mut().zip(&channels) {
            match channel {
                Some((plane, factors)) => upsample_row(plane, *factors, max_factors, y, row),
                None => row.fill(NEUTRAL_SAMPLE),
            }
        }
        let [row_y, row_cb, row_cr] = &rows;
        ycbcr::convert_row(row_y, row_cb, row_cr, raster.row_mut(y));
    }
    Ok(raster)
}
