// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::coeff_order::NATURAL_TO_ZIGZAG;
use crate::entropy_coding::huffman::{check_table_index, MAX_TABLES};
use crate::error::{Error, Result};
use crate::markers::{MarkerSegment, SegmentReader};
use crate::util::tracing_wrappers::*;
use crate::BLOCK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Bits8,
    Bits16,
}

impl Precision {
    pub fn from_nibble(precision: u8) -> Result<Precision> {
        match precision {
            0 => Ok(Precision::Bits8),
            1 => Ok(Precision::Bits16),
            _ => Err(Error::InvalidQuantizationPrecision(precision)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    pub precision: Precision,
    /// Quantization values in zig-zag order.
    pub values: [u16; BLOCK_SIZE],
}

impl QuantizationTable {
    /// Reads one table of a DQT segment, returning its slot index with it.
    pub fn read(reader: &mut SegmentReader) -> Result<(u8, QuantizationTable)> {
        let (precision, index) = reader.read_nibbles()?;
        let precision = Precision::from_nibble(precision)?;
        let index = check_table_index(index)?;
        let mut values = [0; BLOCK_SIZE];
        for value in values.iter_mut() {
            *value = match precision {
                Precision::Bits8 => reader.read_u8()?.into(),
                Precision::Bits16 => reader.read_u16()?,
            };
        }
        Ok((index, QuantizationTable { precision, values }))
    }

    /// Scales coefficients given in zig-zag order and returns them in
    /// natural order.
    pub fn dequantize(&self, coefficients: &[i32; BLOCK_SIZE]) -> [f64; BLOCK_SIZE] {
        std::array::from_fn(|position| {
            let k = NATURAL_TO_ZIGZAG[position];
            f64::from(coefficients[k]) * f64::from(self.values[k])
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantizationTables {
    tables: [Option<QuantizationTable>; MAX_TABLES],
}

impl QuantizationTables {
    /// Reads every table of a DQT segment. A table replaces any earlier one
    /// in the same slot.
    pub fn read_segment(&mut self, segment: &MarkerSegment) -> Result<()> {
        let mut reader = segment.reader();
        while !reader.is_empty() {
            let (index, table) = QuantizationTable::read(&mut reader)?;
            debug!(index, precision = ?table.precision, "defined quantization table");
            self.tables[usize::from(index)] = Some(table);
        }
        Ok(())
    }

    pub fn get(&self, index: u8) -> Result<&QuantizationTable> {
        self.tables
            .get(usize::from(index))
            .and_then(Option::as_ref)
            .ok_or(Error::MissingQuantizationTable(index))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::markers::{scan_segments, SegmentKind};
    use crate::util::test::single_segment_file;

    fn read_tables(payload: &[u8]) -> Result<QuantizationTables> {
        let buffer = single_segment_file(0xDB, payload);
        let segments = scan_segments(&buffer)?;
        let mut tables = QuantizationTables::default();
        tables.read_segment(&segments[1])?;
        Ok(tables)
    }

    #[test]
    fn eight_and_sixteen_bit_tables_in_one_segment() -> Result<()> {
        let mut payload = vec![0x00];
        payload.extend(1..=64u8);
        payload.push(0x12);
        for i in 0..64u16 {
            payload.extend_from_slice(&(i * 300).to_be_bytes());
        }
        let tables = read_tables(&payload)?;
        let first = tables.get(0)?;
        assert_eq!(first.precision, Precision::Bits8);
        assert_eq!(first.values[0], 1);
        assert_eq!(first.values[63], 64);
        let second = tables.get(2)?;
        assert_eq!(second.precision, Precision::Bits16);
        assert_eq!(second.values[5], 1500);
        assert!(matches!(
            tables.get(1),
            Err(Error::MissingQuantizationTable(1))
        ));
        Ok(())
    }

    #[test]
    fn bad_precision() {
        let mut payload = vec![0x20];
        payload.extend([1; 64]);
        assert!(matches!(
            read_tables(&payload),
            Err(Error::InvalidQuantizationPrecision(2))
        ));
    }

    #[test]
    fn bad_index() {
        let mut payload = vec![0x05];
        payload.extend([1; 64]);
        assert!(matches!(
            read_tables(&payload),
            Err(Error::InvalidTableIndex(5))
        ));
    }

    #[test]
    fn short_table() {
        let mut payload = vec![0x00];
        payload.extend([1; 63]);
        assert!(matches!(
            read_tables(&payload),
            Err(Error::TruncatedSegment(SegmentKind::DefineQuantizationTables))
        ));
    }

    #[test]
    fn dequantize_reorders() {
        let table = QuantizationTable {
            precision: Precision::Bits8,
            values: std::array::from_fn(|i| i as u16 + 1),
        };
        let mut coefficients = [0; BLOCK_SIZE];
        coefficients[0] = 3;
        coefficients[2] = -2;
        coefficients[63] = 1;
        let natural = table.dequantize(&coefficients);
        assert_eq!(natural[0], 3.0);
        // Zig-zag position 2 is row 1, column 0.
        assert_eq!(natural[8], -6.0);
        assert_eq!(natural[63], 64.0);
        assert_eq!(natural.iter().filter(|&&c| c != 0.0).count(), 3);
    }
}
