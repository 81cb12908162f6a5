// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Splitting of a JPEG file into marker segments.

mod kind;
mod reader;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::util::tracing_wrappers::*;

pub use kind::SegmentKind;
pub use reader::SegmentReader;

pub const MARKER_PREFIX: u8 = 0xFF;

/// A marker segment, located by offsets into the buffer it was scanned from.
///
/// The header payload starts after the marker and its length field. Only
/// start-of-scan segments have a data region, holding the entropy-coded
/// data that follows the header up to the next marker.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MarkerSegment<'a> {
    kind: SegmentKind,
    segment_offset: usize,
    segment_size: usize,
    data_offset: usize,
    data_size: usize,
    source: &'a [u8],
}

impl std::fmt::Debug for MarkerSegment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerSegment")
            .field("kind", &self.kind)
            .field("segment_offset", &self.segment_offset)
            .field("segment_size", &self.segment_size)
            .field("data_offset", &self.data_offset)
            .field("data_size", &self.data_size)
            .finish()
    }
}

impl<'a> MarkerSegment<'a> {
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn segment_offset(&self) -> usize {
        self.segment_offset
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// The header payload, without the marker and length field.
    pub fn contents(&self) -> &'a [u8] {
        &self.source[self.segment_offset..self.segment_offset + self.segment_size]
    }

    /// The entropy-coded data following a start-of-scan header. Empty for
    /// every other kind.
    pub fn data(&self) -> &'a [u8] {
        &self.source[self.data_offset..self.data_offset + self.data_size]
    }

    pub fn reader(&self) -> SegmentReader<'a> {
        SegmentReader::new(self.kind, self.contents())
    }
}

/// Splits `buffer` into its marker segments, in stream order, and checks
/// that they start with SOI and end with EOI.
///
/// `0xFF` followed by `0x00` (a stuffed byte) or by another `0xFF` (fill) is
/// not a marker, and neither are restart markers inside entropy-coded data:
/// those stay part of the scan's data region.
pub fn scan_segments(buffer: &[u8]) -> Result<Vec<MarkerSegment<'_>>> {
    let mut segments: Vec<MarkerSegment> = Vec::new();
    // Index of the segment whose entropy-coded data is still being measured.
    let mut open_data: Option<usize> = None;
    let mut offset = 0;
    while offset + 2 <= buffer.len() {
        let (prefix, marker) = (buffer[offset], buffer[offset + 1]);
        if prefix != MARKER_PREFIX || marker == MARKER_PREFIX || marker == 0 {
            offset += 1;
            continue;
        }
        let kind = SegmentKind::from_marker(marker).ok_or(Error::UnrecognisedMarker(marker))?;
        if open_data.is_some() && matches!(kind, SegmentKind::Restart(_)) {
            offset += 2;
            continue;
        }
        if kind.is_unsupported() {
            return Err(Error::UnsupportedMarker(marker));
        }
        if let Some(open) = open_data.take() {
            let previous = &mut segments[open];
            previous.data_size = offset - previous.data_offset;
        }

        let (segment_offset, segment_size) = if kind.is_empty() {
            (offset + 2, 0)
        } else {
            let length = buffer
                .get(offset + 2..offset + 4)
                .map(BigEndian::read_u16)
                .ok_or(Error::SegmentOutOfBounds { offset, kind })?;
            let size = usize::from(length)
                .checked_sub(2)
                .ok_or(Error::InvalidSegmentLength(length))?;
            (offset + 4, size)
        };
        let data_offset = segment_offset + segment_size;
        if data_offset > buffer.len() {
            return Err(Error::SegmentOutOfBounds { offset, kind });
        }
        trace!(?kind, offset, segment_size, "found segment");

        if kind.has_data() {
            open_data = Some(segments.len());
        }
        segments.push(MarkerSegment {
            kind,
            segment_offset,
            segment_size,
            data_offset,
            data_size: 0,
            source: buffer,
        });
        offset = data_offset;
    }

    validate(&segments)?;
    Ok(segments)
}

/// Checks the framing of a segment list: non-empty, opened by SOI and closed
/// by EOI.
pub fn validate(segments: &[MarkerSegment]) -> Result<()> {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::NoSegments),
    };
    if first.kind != SegmentKind::StartOfImage {
        return Err(Error::MissingStartOfImageMarker);
    }
    if last.kind != SegmentKind::EndOfImage {
        return Err(Error::MissingEndOfImageMarker);
    }
    Ok(())
}
