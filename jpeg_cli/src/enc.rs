// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use baseline_jpeg::Raster;
use color_eyre::eyre::{eyre, Result};

/// Writes `raster` as an 8-bit RGBA PNG.
pub fn to_png<Writer: Write>(raster: &Raster, buf: &mut Writer) -> Result<()> {
    let width = u32::try_from(raster.width())
        .map_err(|_| eyre!("Raster too wide for PNG output: {}", raster.width()))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| eyre!("Raster too tall for PNG output: {}", raster.height()))?;
    let mut encoder = png::Encoder::new(buf, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.pixels())?;
    writer.finish()?;
    Ok(())
}
