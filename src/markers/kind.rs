// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Kind of a marker segment, identified by the byte following the `0xFF`
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    StartOfFrameBaseline,
    StartOfFrameExtendedSequential,
    StartOfFrameProgressive,
    StartOfFrameLossless,
    DefineHuffmanTables,
    StartOfFrameDifferentialSequential,
    StartOfFrameDifferentialProgressive,
    StartOfFrameDifferentialLossless,
    JpegExtensions,
    StartOfFrameArithmeticExtendedSequential,
    StartOfFrameArithmeticProgressive,
    StartOfFrameArithmeticLossless,
    DefineArithmeticCodingConditions,
    StartOfFrameDifferentialArithmeticSequential,
    StartOfFrameDifferentialArithmeticProgressive,
    StartOfFrameDifferentialArithmeticLossless,
    /// Restart marker `RSTn`, n in 0..=7.
    Restart(u8),
    StartOfImage,
    EndOfImage,
    StartOfScan,
    DefineQuantizationTables,
    DefineNumberOfLines,
    DefineRestartInterval,
    DefineHierarchicalProgression,
    ExpandReferenceComponents,
    /// Application segment `APPn`, n in 0..=15.
    Application(u8),
    Comment,
    Temporary,
}

impl SegmentKind {
    pub fn from_marker(marker: u8) -> Option<SegmentKind> {
        use SegmentKind::*;
        let kind = match marker {
            0x01 => Temporary,
            0xC0 => StartOfFrameBaseline,
            0xC1 => StartOfFrameExtendedSequential,
            0xC2 => StartOfFrameProgressive,
            0xC3 => StartOfFrameLossless,
            0xC4 => DefineHuffmanTables,
            0xC5 => StartOfFrameDifferentialSequential,
            0xC6 => StartOfFrameDifferentialProgressive,
            0xC7 => StartOfFrameDifferentialLossless,
            0xC8 => JpegExtensions,
            0xC9 => StartOfFrameArithmeticExtendedSequential,
            0xCA => StartOfFrameArithmeticProgressive,
            0xCB => StartOfFrameArithmeticLossless,
            0xCC => DefineArithmeticCodingConditions,
            0xCD => StartOfFrameDifferentialArithmeticSequential,
            0xCE => StartOfFrameDifferentialArithmeticProgressive,
            0xCF => StartOfFrameDifferentialArithmeticLossless,
            0xD0..=0xD7 => Restart(marker - 0xD0),
            0xD8 => StartOfImage,
            0xD9 => EndOfImage,
            0xDA => StartOfScan,
            0xDB => DefineQuantizationTables,
            0xDC => DefineNumberOfLines,
            0xDD => DefineRestartInterval,
            0xDE => DefineHierarchicalProgression,
            0xDF => ExpandReferenceComponents,
            0xE0..=0xEF => Application(marker - 0xE0),
            0xFE => Comment,
            _ => return None,
        };
        Some(kind)
    }

    pub fn marker(self) -> u8 {
        use SegmentKind::*;
        match self {
            Temporary => 0x01,
            StartOfFrameBaseline => 0xC0,
            StartOfFrameExtendedSequential => 0xC1,
            StartOfFrameProgressive => 0xC2,
            StartOfFrameLossless => 0xC3,
            DefineHuffmanTables => 0xC4,
            StartOfFrameDifferentialSequential => 0xC5,
            StartOfFrameDifferentialProgressive => 0xC6,
            StartOfFrameDifferentialLossless => 0xC7,
            JpegExtensions => 0xC8,
            StartOfFrameArithmeticExtendedSequential => 0xC9,
            StartOfFrameArithmeticProgressive => 0xCA,
            StartOfFrameArithmeticLossless => 0xCB,
            DefineArithmeticCodingConditions => 0xCC,
            StartOfFrameDifferentialArithmeticSequential => 0xCD,
            StartOfFrameDifferentialArithmeticProgressive => 0xCE,
            StartOfFrameDifferentialArithmeticLossless => 0xCF,
            Restart(n) => 0xD0 + n,
            StartOfImage => 0xD8,
            EndOfImage => 0xD9,
            StartOfScan => 0xDA,
            DefineQuantizationTables => 0xDB,
            DefineNumberOfLines => 0xDC,
            DefineRestartInterval => 0xDD,
            DefineHierarchicalProgression => 0xDE,
            ExpandReferenceComponents => 0xDF,
            Application(n) => 0xE0 + n,
            Comment => 0xFE,
        }
    }

    /// Whether the marker stands alone, without a length field or payload.
    pub fn is_empty(self) -> bool {
        matches!(
            self,
            SegmentKind::StartOfImage
                | SegmentKind::EndOfImage
                | SegmentKind::Restart(_)
                | SegmentKind::Temporary
        )
    }

    /// Whether the segment is followed by entropy-coded data.
    pub fn has_data(self) -> bool {
        self == SegmentKind::StartOfScan
    }

    /// Whether the segment belongs to a coding process this decoder does not
    /// implement (extended, progressive, lossless, hierarchical, arithmetic).
    pub fn is_unsupported(self) -> bool {
        use SegmentKind::*;
        matches!(
            self,
            StartOfFrameExtendedSequential
                | StartOfFrameProgressive
                | StartOfFrameLossless
                | StartOfFrameDifferentialSequential
                | StartOfFrameDifferentialProgressive
                | StartOfFrameDifferentialLossless
                | JpegExtensions
                | StartOfFrameArithmeticExtendedSequential
                | StartOfFrameArithmeticProgressive
                | StartOfFrameArithmeticLossless
                | DefineArithmeticCodingConditions
                | StartOfFrameDifferentialArithmeticSequential
                | StartOfFrameDifferentialArithmeticProgressive
                | StartOfFrameDifferentialArithmeticLossless
                | DefineHierarchicalProgression
                | ExpandReferenceComponents
        )
    }
}
