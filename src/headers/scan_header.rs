// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::check_component_count;
use crate::entropy_coding::huffman::check_table_index;
use crate::error::Result;
use crate::markers::MarkerSegment;
use crate::util::tracing_wrappers::*;

/// A component taking part in a scan, with its Huffman table assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanComponent {
    pub id: u8,
    pub dc_table: u8,
    pub ac_table: u8,
}

/// Contents of a start-of-scan (SOS) header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHeader {
    /// Components in coding order. Blocks of an MCU are interleaved in this
    /// order, so it must never be sorted.
    pub components: Vec<ScanComponent>,
}

impl ScanHeader {
    /// Reads the header part of an SOS segment. The spectral selection and
    /// successive approximation bytes that follow the component list are
    /// fixed for baseline images and are not read.
    pub fn read(segment: &MarkerSegment) -> Result<ScanHeader> {
        let mut reader = segment.reader();
        let count = check_component_count(reader.read_u8()?)?;
        let components = (0..count)
            .map(|_| {
                let id = reader.read_u8()?;
                let (dc_table, ac_table) = reader.read_nibbles()?;
                Ok(ScanComponent {
                    id,
                    dc_table: check_table_index(dc_table)?,
                    ac_table: check_table_index(ac_table)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let header = ScanHeader { components };
        debug!(?header, "read scan header");
        Ok(header)
    }

    pub fn is_interleaved(&self) -> bool {
        self.components.len() > 1
    }
}
