// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use byteorder::{BigEndian, ReadBytesExt};

use super::SegmentKind;
use crate::error::{Error, Result};

/// Reads big-endian fields from a segment payload. Reading past the end of
/// the payload fails with [`Error::TruncatedSegment`].
#[derive(Debug, Clone)]
pub struct SegmentReader<'a> {
    kind: SegmentKind,
    contents: &'a [u8],
}

impl<'a> SegmentReader<'a> {
    pub fn new(kind: SegmentKind, contents: &'a [u8]) -> SegmentReader<'a> {
        SegmentReader { kind, contents }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let kind = self.kind;
        self.contents
            .read_u8()
            .map_err(|_| Error::TruncatedSegment(kind))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let kind = self.kind;
        self.contents
            .read_u16::<BigEndian>()
            .map_err(|_| Error::TruncatedSegment(kind))
    }

    /// Reads one byte and splits it into its high and low nibbles.
    pub fn read_nibbles(&mut self) -> Result<(u8, u8)> {
        let byte = self.read_u8()?;
        Ok((byte >> 4, byte & 0x0F))
    }

    pub fn read_bytes(&mut self, num: usize) -> Result<&'a [u8]> {
        if num > self.contents.len() {
            return Err(Error::TruncatedSegment(self.kind));
        }
        let (bytes, rest) = self.contents.split_at(num);
        self.contents = rest;
        Ok(bytes)
    }

    pub fn remaining(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
