// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::entropy_coding::huffman::TableClass;
use crate::markers::SegmentKind;

#[derive(Error, Debug)]
pub enum Error {
    // Boundary errors, only produced when loading input files.
    #[error("No file found: {0}")]
    NoFile(PathBuf),
    #[error("Unable to read file contents: {0}")]
    FileReadError(#[source] std::io::Error),
    // Framing errors
    #[error("No segments found")]
    NoSegments,
    #[error("Missing start of image marker")]
    MissingStartOfImageMarker,
    #[error("Missing end of image marker")]
    MissingEndOfImageMarker,
    #[error("Unrecognised marker: {0:#04x}")]
    UnrecognisedMarker(u8),
    #[error("Unsupported marker: {0:#04x}")]
    UnsupportedMarker(u8),
    #[error("Invalid segment length {0}, must be at least 2")]
    InvalidSegmentLength(u16),
    #[error("{kind:?} segment at offset {offset} extends past the end of the buffer")]
    SegmentOutOfBounds { offset: usize, kind: SegmentKind },
    #[error("{0:?} segment is truncated")]
    TruncatedSegment(SegmentKind),
    #[error("Missing {0:?} segment")]
    MissingSegment(SegmentKind),
    #[error("More than one frame in a baseline image")]
    MultipleFrames,
    // Table errors
    #[error("Invalid Huffman table: more codes than the code lengths allow")]
    InvalidHuffmanTable,
    #[error("Invalid Huffman table class {0}, expected 0 (DC) or 1 (AC)")]
    InvalidHuffmanTableClass(u8),
    #[error("Invalid table index {0}, max is 3")]
    InvalidTableIndex(u8),
    #[error("Invalid quantization table precision {0}, expected 0 or 1")]
    InvalidQuantizationPrecision(u8),
    #[error("Missing {class:?} Huffman table {index}")]
    MissingHuffmanTable { class: TableClass, index: u8 },
    #[error("Missing quantization table {0}")]
    MissingQuantizationTable(u8),
    // Header errors
    #[error("Invalid component count: {0}, expected 1 to 4")]
    InvalidComponentCount(u8),
    #[error("Unknown component id {0}")]
    UnknownComponentId(u8),
    #[error("Component id {0} declared twice")]
    DuplicateComponentId(u8),
    #[error("Invalid sampling factors {0}x{1}, each must be 1 to 4")]
    InvalidSamplingFactors(u8, u8),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    // Entropy-coded data errors
    #[error("Invalid Huffman code")]
    InvalidHuffmanCode,
    #[error("Invalid coefficient category {0}")]
    InvalidCategory(u8),
    #[error("Compressed stream truncated")]
    TruncatedStream,
}

pub type Result<T> = std::result::Result<T, Error>;
