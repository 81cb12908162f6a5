// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::util::tracing_wrappers::*;
use crate::BLOCK_DIM;

/// Bytes per output pixel: R, G, B, A.
pub const CHANNELS: usize = 4;

fn allocate<T: Clone>(size: (usize, usize), elements_per_pixel: usize, value: T) -> Result<Vec<T>> {
    let (xsize, ysize) = size;
    // These limits let us not worry about overflows.
    if xsize as u64 >= i64::MAX as u64 / 4 || ysize as u64 >= i64::MAX as u64 / 4 {
        return Err(Error::ImageSizeTooLarge(xsize, ysize));
    }
    let total_size = xsize
        .checked_mul(ysize)
        .and_then(|s| s.checked_mul(elements_per_pixel))
        .ok_or(Error::ImageSizeTooLarge(xsize, ysize))?;
    if xsize == 0 || ysize == 0 {
        return Err(Error::InvalidImageSize(xsize, ysize));
    }
    debug!(xsize, ysize, "trying to allocate image");
    let mut data = vec![];
    data.try_reserve_exact(total_size)?;
    data.resize(total_size, value);
    Ok(data)
}

/// Decoded samples of one component, in the component's own resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct SamplePlane {
    size: (usize, usize),
    samples: Vec<u8>,
}

impl Debug for SamplePlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SamplePlane {}x{}", self.size.0, self.size.1)
    }
}

impl SamplePlane {
    /// Creates a plane where every sample is `value`.
    pub fn new(size: (usize, usize), value: u8) -> Result<SamplePlane> {
        Ok(SamplePlane {
            size,
            samples: allocate(size, 1, value)?,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    /// Writes an 8x8 block of samples, row-major, at block column `bx` and
    /// block row `by`.
    pub fn store_block(&mut self, bx: usize, by: usize, block: &[u8]) {
        let x0 = bx * BLOCK_DIM;
        for (row, samples) in block.chunks_exact(BLOCK_DIM).enumerate() {
            let start = (by * BLOCK_DIM + row) * self.size.0 + x0;
            self.samples[start..start + BLOCK_DIM].copy_from_slice(samples);
        }
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.samples[y * self.size.0..(y + 1) * self.size.0]
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.samples[y * self.size.0 + x]
    }
}

/// RGBA8 pixels, row-major, covering whole 8x8 blocks.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    size: (usize, usize),
    image_size: (usize, usize),
    pixels: Vec<u8>,
}

impl Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Raster {}x{} (image {}x{})",
            self.size.0, self.size.1, self.image_size.0, self.image_size.1
        )
    }
}

impl Raster {
    /// Creates an opaque black raster of `size` pixels holding an image of
    /// `image_size` pixels in its top-left corner.
    pub fn new(size: (usize, usize), image_size: (usize, usize)) -> Result<Raster> {
        let mut pixels = allocate(size, CHANNELS, 0)?;
        pixels
            .chunks_exact_mut(CHANNELS)
            .for_each(|pixel| pixel[CHANNELS - 1] = u8::MAX);
        Ok(Raster {
            size,
            image_size,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.size.0
    }

    pub fn height(&self) -> usize {
        self.size.1
    }

    /// Size of the image before padding to whole blocks.
    pub fn image_size(&self) -> (usize, usize) {
        self.image_size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let start = (y * self.size.0 + x) * CHANNELS;
        let mut pixel = [0; CHANNELS];
        pixel.copy_from_slice(&self.pixels[start..start + CHANNELS]);
        pixel
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.size.0 * CHANNELS;
        &mut self.pixels[y * stride..(y + 1) * stride]
    }

    /// Copies the pixels inside the image size into a raster without the
    /// block padding.
    pub fn cropped(&self) -> Result<Raster> {
        let mut cropped = Raster::new(self.image_size, self.image_size)?;
        let stride = self.size.0 * CHANNELS;
        let row_bytes = self.image_size.0 * CHANNELS;
        for y in 0..self.image_size.1 {
            cropped
                .row_mut(y)
                .copy_from_slice(&self.pixels[y * stride..y * stride + row_bytes]);
        }
        Ok(cropped)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn huge_image() {
        assert!(matches!(
            Raster::new((1 << 62, 1 << 62), (1, 1)),
            Err(Error::ImageSizeTooLarge(..))
        ));
        assert!(matches!(
            SamplePlane::new((usize::MAX / 8, 16), 0),
            Err(Error::ImageSizeTooLarge(..))
        ));
    }

    #[test]
    fn zero_sized_image() {
        assert!(matches!(
            SamplePlane::new((0, 8), 0),
            Err(Error::InvalidImageSize(0, 8))
        ));
    }

    #[test]
    fn blocks_land_in_place() -> Result<()> {
        let mut plane = SamplePlane::new((16, 16), 128)?;
        let block: Vec<u8> = (0..64).collect();
        plane.store_block(1, 1, &block);
        assert_eq!(plane.get(8, 8), 0);
        assert_eq!(plane.get(15, 8), 7);
        assert_eq!(plane.get(8, 9), 8);
        assert_eq!(plane.get(15, 15), 63);
        assert_eq!(plane.get(7, 7), 128);
        assert_eq!(plane.row(9)[8..16], block[8..16]);
        Ok(())
    }

    #[test]
    fn new_raster_is_opaque() -> Result<()> {
        let raster = Raster::new((8, 8), (5, 3))?;
        assert_eq!(raster.width(), 8);
        assert_eq!(raster.height(), 8);
        assert_eq!(raster.image_size(), (5, 3));
        assert_eq!(raster.pixels().len(), 8 * 8 * CHANNELS);
        assert_eq!(raster.pixel(7, 7), [0, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn crop_removes_padding() -> Result<()> {
        let mut raster = Raster::new((8, 8), (3, 2))?;
        for y in 0..8 {
            for (x, pixel) in raster.row_mut(y).chunks_exact_mut(CHANNELS).enumerate() {
                pixel[0] = (y * 8 + x) as u8;
            }
        }
        let cropped = raster.cropped()?;
        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.pixel(2, 1), [10, 0, 0, 255]);
        assert_eq!(cropped.into_pixels().len(), 3 * 2 * CHANNELS);
        Ok(())
    }
}
