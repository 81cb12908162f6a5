// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The decoding pipeline, from file bytes to an RGBA raster.

use crate::entropy_coding::huffman::HuffmanTables;
use crate::error::{Error, Result};
use crate::frame::quantizer::QuantizationTables;
use crate::frame::{Frame, ScanContext};
use crate::headers::{read_restart_interval, FrameHeader, ScanHeader};
use crate::image::Raster;
use crate::markers::{scan_segments, MarkerSegment, SegmentKind};
use crate::util::tracing_wrappers::*;

/// Limits applied while decoding.
///
/// ```
/// use baseline_jpeg::DecodeOptions;
///
/// // Default limit of 2^28 pixels
/// let options = DecodeOptions::default();
///
/// // No limit, for trusted content
/// let options = DecodeOptions::unlimited();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of pixels of the block-padded raster.
    /// Default: `Some(1 << 28)`.
    pub max_pixels: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_pixels: Some(1 << 28),
        }
    }
}

impl DecodeOptions {
    pub fn unlimited() -> Self {
        Self { max_pixels: None }
    }

    fn check_frame_size(&self, header: &FrameHeader) -> Result<()> {
        let (width, height) = header.padded_size();
        let Some(max_pixels) = self.max_pixels else {
            return Ok(());
        };
        match width.checked_mul(height) {
            Some(pixels) if pixels <= max_pixels => Ok(()),
            _ => Err(Error::ImageSizeTooLarge(width, height)),
        }
    }
}

/// Decoding state carried from segment to segment: the tables defined so
/// far and the frame being filled in.
#[derive(Debug)]
pub struct Decoder {
    options: DecodeOptions,
    huffman_tables: HuffmanTables,
    quant_tables: QuantizationTables,
    restart_interval: u16,
    frame: Option<Frame>,
    scans: usize,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Decoder {
        Decoder {
            options,
            huffman_tables: HuffmanTables::default(),
            quant_tables: QuantizationTables::default(),
            restart_interval: 0,
            frame: None,
            scans: 0,
        }
    }

    pub fn huffman_tables(&self) -> &HuffmanTables {
        &self.huffman_tables
    }

    pub fn quant_tables(&self) -> &QuantizationTables {
        &self.quant_tables
    }

    pub fn restart_interval(&self) -> u16 {
        self.restart_interval
    }

    pub fn frame_header(&self) -> Option<&FrameHeader> {
        self.frame.as_ref().map(Frame::header)
    }

    /// Applies one segment. Segments must be given in stream order: a scan is
    /// decoded with the tables defined before it.
    pub fn process_segment(&mut self, segment: &MarkerSegment) -> Result<()> {
        match segment.kind() {
            SegmentKind::StartOfFrameBaseline => {
                if self.frame.is_some() {
                    return Err(Error::MultipleFrames);
                }
                let header = FrameHeader::read(segment)?;
                self.options.check_frame_size(&header)?;
                self.frame = Some(Frame::new(header)?);
            }
            SegmentKind::DefineHuffmanTables => self.huffman_tables.read_segment(segment)?,
            SegmentKind::DefineQuantizationTables => self.quant_tables.read_segment(segment)?,
            SegmentKind::DefineRestartInterval => {
                self.restart_interval = read_restart_interval(segment)?;
                debug!(restart_interval = self.restart_interval, "defined restart interval");
            }
            SegmentKind::StartOfScan => {
                let frame = self
                    .frame
                    .as_mut()
                    .ok_or(Error::MissingSegment(SegmentKind::StartOfFrameBaseline))?;
                let scan = ScanHeader::read(segment)?;
                let context = ScanContext {
                    huffman_tables: &self.huffman_tables,
                    quant_tables: &self.quant_tables,
                    restart_interval: self.restart_interval,
                };
                frame.decode_scan(&scan, segment.data(), context)?;
                self.scans += 1;
            }
            SegmentKind::StartOfImage | SegmentKind::EndOfImage => {}
            _ => trace!(kind = ?segment.kind(), "ignoring segment"),
        }
        Ok(())
    }

    /// Renders the decoded frame.
    pub fn finish(self) -> Result<Raster> {
        let frame = self
            .frame
            .ok_or(Error::MissingSegment(SegmentKind::StartOfFrameBaseline))?;
        if self.scans == 0 {
            return Err(Error::MissingSegment(SegmentKind::StartOfScan));
        }
        frame.render()
    }
}

/// Decodes a baseline JPEG file with the default [`DecodeOptions`].
pub fn decode(buffer: &[u8]) -> Result<Raster> {
    decode_with_options(buffer, &DecodeOptions::default())
}

pub fn decode_with_options(buffer: &[u8], options: &DecodeOptions) -> Result<Raster> {
    let segments = scan_segments(buffer)?;
    let mut decoder = Decoder::new(options.clone());
    for segment in &segments {
        decoder.process_segment(segment)?;
    }
    decoder.finish()
}
