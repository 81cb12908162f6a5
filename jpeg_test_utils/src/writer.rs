// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A minimal baseline JPEG writer for building test inputs byte by byte.

use std::collections::HashMap;

pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOF0: u8 = 0xC0;
pub const DHT: u8 = 0xC4;
pub const DQT: u8 = 0xDB;
pub const SOS: u8 = 0xDA;
pub const DRI: u8 = 0xDD;
pub const RST0: u8 = 0xD0;
pub const COM: u8 = 0xFE;
pub const APP0: u8 = 0xE0;

/// Writes bits most significant first, stuffing a zero byte after every
/// `0xFF`.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: usize,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    /// Appends the low `length` bits of `bits`.
    pub fn write(&mut self, bits: u16, length: usize) {
        for i in (0..length).rev() {
            self.current = (self.current << 1) | ((bits >> i) & 1) as u8;
            self.filled += 1;
            if self.filled == 8 {
                self.push_byte();
            }
        }
    }

    fn push_byte(&mut self) {
        self.bytes.push(self.current);
        if self.current == 0xFF {
            self.bytes.push(0x00);
        }
        self.current = 0;
        self.filled = 0;
    }

    /// Pads the last byte with one bits and returns the stuffed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            let padding = 8 - self.filled;
            self.write((1 << padding) - 1, padding);
        }
        self.bytes
    }
}

/// Assigns canonical codes to a table given as 16 code length counts and
/// the symbols in code order. Returns `(symbol, code, length)` triples.
pub fn canonical_codes(counts: &[u8], symbols: &[u8]) -> Vec<(u8, u16, usize)> {
    let mut codes = Vec::with_capacity(symbols.len());
    let mut symbols = symbols.iter();
    let mut code = 0u32;
    for (length, &count) in (1..).zip(counts) {
        for _ in 0..count {
            if let Some(&symbol) = symbols.next() {
                codes.push((symbol, code as u16, length));
            }
            code += 1;
        }
        code <<= 1;
    }
    codes
}

/// Splits a coefficient difference into its category and the bits stored
/// after the category symbol.
pub fn encode_value(value: i32) -> (u8, u16) {
    if value == 0 {
        return (0, 0);
    }
    let category = (32 - value.unsigned_abs().leading_zeros()) as u8;
    let bits = if value < 0 {
        value + (1 << category) - 1
    } else {
        value
    };
    (category, bits as u16)
}

/// A Huffman table as written in a DHT segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanSpec {
    pub counts: [u8; 16],
    pub symbols: Vec<u8>,
}

impl HuffmanSpec {
    /// All `symbols` at the shortest common length that leaves the all-ones
    /// code unused.
    pub fn uniform(symbols: &[u8]) -> HuffmanSpec {
        let mut length = 1;
        while (1usize << length) <= symbols.len() {
            length += 1;
        }
        let mut counts = [0; 16];
        counts[length - 1] = symbols.len() as u8;
        HuffmanSpec {
            counts,
            symbols: symbols.to_vec(),
        }
    }

    /// Every DC category, 0 to 11.
    pub fn dc() -> HuffmanSpec {
        HuffmanSpec::uniform(&(0..=11).collect::<Vec<_>>())
    }

    /// End-of-block, the 16-zero run and every run/category pair with a
    /// category from 1 to 10.
    pub fn ac() -> HuffmanSpec {
        let mut symbols = vec![0x00, 0xF0];
        for run in 0..16u8 {
            for category in 1..=10u8 {
                symbols.push((run << 4) | category);
            }
        }
        HuffmanSpec::uniform(&symbols)
    }

    pub fn encoder(&self) -> HuffmanEncoder {
        HuffmanEncoder {
            codes: canonical_codes(&self.counts, &self.symbols)
                .into_iter()
                .map(|(symbol, code, length)| (symbol, (code, length)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codes: HashMap<u8, (u16, usize)>,
}

impl HuffmanEncoder {
    pub fn write(&self, writer: &mut BitWriter, symbol: u8) {
        let (code, length) = self.codes[&symbol];
        writer.write(code, length);
    }
}

/// Encodes blocks of quantized coefficients, given in zig-zag order.
#[derive(Debug, Clone)]
pub struct BlockEncoder {
    pub dc: HuffmanEncoder,
    pub ac: HuffmanEncoder,
}

impl BlockEncoder {
    pub fn new(dc: &HuffmanSpec, ac: &HuffmanSpec) -> BlockEncoder {
        BlockEncoder {
            dc: dc.encoder(),
            ac: ac.encoder(),
        }
    }

    pub fn encode(&self, writer: &mut BitWriter, coefficients: &[i32; 64], predictor: &mut i32) {
        let (category, bits) = encode_value(coefficients[0] - *predictor);
        *predictor = coefficients[0];
        self.dc.write(writer, category);
        writer.write(bits, category.into());

        let mut run = 0;
        for &coefficient in &coefficients[1..] {
            if coefficient == 0 {
                run += 1;
                continue;
            }
            while run > 15 {
                self.ac.write(writer, 0xF0);
                run -= 16;
            }
            let (category, bits) = encode_value(coefficient);
            self.ac.write(writer, (run << 4) | category);
            writer.write(bits, category.into());
            run = 0;
        }
        if run > 0 {
            self.ac.write(writer, 0x00);
        }
    }

    /// Encodes a block whose only nonzero coefficient is its DC value.
    pub fn encode_dc(&self, writer: &mut BitWriter, dc: i32, predictor: &mut i32) {
        let mut coefficients = [0; 64];
        coefficients[0] = dc;
        self.encode(writer, &coefficients, predictor);
    }
}

/// Builds a JPEG file segment by segment. Starts with SOI.
#[derive(Debug)]
pub struct JpegWriter {
    bytes: Vec<u8>,
}

impl Default for JpegWriter {
    fn default() -> Self {
        JpegWriter::new()
    }
}

impl JpegWriter {
    pub fn new() -> JpegWriter {
        JpegWriter {
            bytes: vec![0xFF, SOI],
        }
    }

    pub fn marker(&mut self, marker: u8) -> &mut Self {
        self.bytes.extend_from_slice(&[0xFF, marker]);
        self
    }

    /// Writes a marker with a length field and `payload`.
    pub fn segment(&mut self, marker: u8, payload: &[u8]) -> &mut Self {
        self.marker(marker);
        self.bytes
            .extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
        self.bytes.extend_from_slice(payload);
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.segment(COM, text.as_bytes())
    }

    /// Writes a DQT segment with one table, values in zig-zag order. Uses
    /// 16-bit precision when a value does not fit in a byte.
    pub fn quantization_table(&mut self, index: u8, values: &[u16; 64]) -> &mut Self {
        let wide = values.iter().any(|&v| v > 0xFF);
        let mut payload = vec![(u8::from(wide) << 4) | index];
        for &value in values {
            if wide {
                payload.extend_from_slice(&value.to_be_bytes());
            } else {
                payload.push(value as u8);
            }
        }
        self.segment(DQT, &payload)
    }

    /// Writes a DHT segment. `class` is 0 for DC, 1 for AC.
    pub fn huffman_table(&mut self, class: u8, index: u8, spec: &HuffmanSpec) -> &mut Self {
        let mut payload = vec![(class << 4) | index];
        payload.extend_from_slice(&spec.counts);
        payload.extend_from_slice(&spec.symbols);
        self.segment(DHT, &payload)
    }

    /// Writes an SOF0 segment. Components are `(id, horizontal sampling,
    /// vertical sampling, quantization table)`.
    pub fn frame(&mut self, width: u16, height: u16, components: &[(u8, u8, u8, u8)]) -> &mut Self {
        let mut payload = vec![8];
        payload.extend_from_slice(&height.to_be_bytes());
        payload.extend_from_slice(&width.to_be_bytes());
        payload.push(components.len() as u8);
        for &(id, h, v, tq) in components {
            payload.extend_from_slice(&[id, (h << 4) | v, tq]);
        }
        self.segment(SOF0, &payload)
    }

    pub fn restart_interval(&mut self, interval: u16) -> &mut Self {
        self.segment(DRI, &interval.to_be_bytes())
    }

    /// Writes an SOS segment followed by its entropy-coded `data`.
    /// Components are `(id, dc table, ac table)`.
    pub fn scan(&mut self, components: &[(u8, u8, u8)], data: &[u8]) -> &mut Self {
        let mut payload = vec![components.len() as u8];
        for &(id, dc, ac) in components {
            payload.extend_from_slice(&[id, (dc << 4) | ac]);
        }
        payload.extend_from_slice(&[0, 63, 0]);
        self.segment(SOS, &payload);
        self.raw(data)
    }

    /// Appends EOI and returns the file.
    pub fn finish(&mut self) -> Vec<u8> {
        self.marker(EOI);
        std::mem::take(&mut self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_stuffed_and_padded() {
        let mut writer = BitWriter::new();
        writer.write(0xFF, 8);
        writer.write(0b01, 2);
        assert_eq!(writer.finish(), [0xFF, 0x00, 0b0111_1111]);
    }

    #[test]
    fn canonical_assignment() {
        let mut counts = [0; 16];
        counts[1] = 2;
        counts[2] = 1;
        assert_eq!(
            canonical_codes(&counts, &[7, 8, 9]),
            [(7, 0b00, 2), (8, 0b01, 2), (9, 0b100, 3)]
        );
    }

    #[test]
    fn value_categories() {
        assert_eq!(encode_value(0), (0, 0));
        assert_eq!(encode_value(1), (1, 1));
        assert_eq!(encode_value(-1), (1, 0));
        assert_eq!(encode_value(-3), (2, 0));
        assert_eq!(encode_value(5), (3, 5));
        assert_eq!(encode_value(-2047), (11, 0));
    }

    #[test]
    fn uniform_tables_fit() {
        let ac = HuffmanSpec::ac();
        assert_eq!(ac.symbols.len(), 162);
        assert_eq!(ac.counts[7], 162);
        let dc = HuffmanSpec::dc();
        assert_eq!(dc.counts[3], 12);
    }

    #[test]
    fn segments_carry_length() {
        let bytes = JpegWriter::new().comment("hi").finish();
        assert_eq!(bytes, [0xFF, SOI, 0xFF, COM, 0, 4, b'h', b'i', 0xFF, EOI]);
    }
}
