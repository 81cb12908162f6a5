// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::markers::MARKER_PREFIX;

pub const MAX_BITS_PER_CALL: usize = 16;

/// Reads bits, most significant first, from the entropy-coded data of a scan.
///
/// Stuffed bytes (`0xFF 0x00`) are read as a single `0xFF` data byte, and
/// restart markers can be skipped with [`BitReader::skip_restart_markers`].
/// These are the only places where the scan data is not plain bits.
#[derive(Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_offset: usize,
    bit_offset: u8,
    total_bits_read: usize,
}

impl Debug for BitReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitReader{{ data: [{} bytes], byte_offset: {}, bit_offset: {}, total_bits_read: {} }}",
            self.data.len(),
            self.byte_offset,
            self.bit_offset,
            self.total_bits_read,
        )
    }
}

impl<'a> BitReader<'a> {
    /// Constructs a BitReader for a given range of data.
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            byte_offset: 0,
            bit_offset: 0,
            total_bits_read: 0,
        }
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Position of the next bit within the current byte, 0 being the most
    /// significant bit.
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// Returns the number of data bits that have been read. Stuffed zero bytes
    /// and skipped restart markers are not counted.
    pub fn total_bits_read(&self) -> usize {
        self.total_bits_read
    }

    /// Returns the next bit without consuming it.
    pub fn peek_bit(&self) -> Result<u8> {
        let byte = self
            .data
            .get(self.byte_offset)
            .ok_or(Error::TruncatedStream)?;
        Ok((byte >> (7 - self.bit_offset)) & 1)
    }

    /// Moves past the current bit. When this finishes a `0xFF` byte that is
    /// followed by a stuffed `0x00`, the zero byte is skipped as well.
    pub fn advance_bit(&mut self) {
        self.total_bits_read += 1;
        self.bit_offset += 1;
        if self.bit_offset < 8 {
            return;
        }
        self.bit_offset = 0;
        let stuffed = matches!(
            self.data.get(self.byte_offset..),
            Some([MARKER_PREFIX, 0x00, ..])
        );
        self.byte_offset += if stuffed { 2 } else { 1 };
    }

    pub fn read_bit(&mut self) -> Result<u8> {
        let bit = self.peek_bit()?;
        self.advance_bit();
        Ok(bit)
    }

    /// Reads `num` bits as an unsigned integer, first bit most significant.
    /// ```
    /// # use baseline_jpeg::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0b1010_0000, 0xFF, 0x00, 0x80]);
    /// assert_eq!(br.read(3)?, 0b101);
    /// assert_eq!(br.read(5)?, 0);
    /// assert_eq!(br.read(8)?, 0xFF);
    /// assert_eq!(br.read(1)?, 1);
    /// assert_eq!(br.total_bits_read(), 17);
    /// # Ok::<(), baseline_jpeg::error::Error>(())
    /// ```
    pub fn read(&mut self, num: usize) -> Result<u16> {
        debug_assert!(num <= MAX_BITS_PER_CALL);
        let mut value = 0u16;
        for _ in 0..num {
            value = (value << 1) | u16::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Skips restart markers (`0xFF 0xD0` to `0xFF 0xD7`) found at the next
    /// byte boundary, along with any `0xFF` fill bytes before them. If a
    /// marker is found, the padding bits left in the current byte are
    /// discarded.
    ///
    /// Returns the number (0 to 7) of the last skipped marker, or `None` if
    /// the reader did not move.
    /// ```
    /// # use baseline_jpeg::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0b0111_1111, 0xFF, 0xD3, 0x80]);
    /// assert_eq!(br.read(1)?, 0);
    /// assert_eq!(br.skip_restart_markers(), Some(3));
    /// assert_eq!(br.read(1)?, 1);
    /// assert_eq!(br.skip_restart_markers(), None);
    /// # Ok::<(), baseline_jpeg::error::Error>(())
    /// ```
    pub fn skip_restart_markers(&mut self) -> Option<u8> {
        let mut offset = self.byte_offset;
        if self.bit_offset != 0 {
            // Padding bits can complete a 0xFF byte, which is then stuffed.
            offset += match self.data.get(offset..) {
                Some([MARKER_PREFIX, 0x00, ..]) => 2,
                _ => 1,
            };
        }
        let mut skipped = None;
        loop {
            match self.data.get(offset..) {
                Some([MARKER_PREFIX, MARKER_PREFIX, ..]) => offset += 1,
                Some([MARKER_PREFIX, marker @ 0xD0..=0xD7, ..]) => {
                    skipped = Some(marker & 0x07);
                    offset += 2;
                }
                _ => break,
            }
        }
        if skipped.is_some() {
            self.byte_offset = offset;
            self.bit_offset = 0;
        }
        skipped
    }
}
