// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::bit_reader::BitReader;
use crate::entropy_coding::huffman::HuffmanTree;
use crate::error::{Error, Result};
use crate::BLOCK_SIZE;

/// AC symbol ending a block: every remaining coefficient is zero.
pub const END_OF_BLOCK: u8 = 0x00;
/// AC symbol for a run of 16 zero coefficients.
pub const ZERO_RUN_LENGTH: u8 = 0xF0;
pub const MAX_DC_CATEGORY: u8 = 11;

/// Maps the `category` low bits of a coded value to its signed value. Values
/// whose top bit is clear are negative: `bits - (2^category - 1)`.
pub fn extend(bits: u16, category: u8) -> i32 {
    if category == 0 {
        return 0;
    }
    let value = i32::from(bits);
    if value < 1 << (category - 1) {
        value - ((1 << category) - 1)
    } else {
        value
    }
}

/// Reads a `category`-bit literal and converts it to its signed value.
/// Category 0 consumes no bits.
pub fn read_value(br: &mut BitReader, category: u8) -> Result<i32> {
    let bits = br.read(category.into())?;
    Ok(extend(bits, category))
}

/// Decodes one DC difference.
pub fn decode_dc_diff(br: &mut BitReader, tree: &HuffmanTree) -> Result<i32> {
    let category = tree.decode(br)?;
    if category > MAX_DC_CATEGORY {
        return Err(Error::InvalidCategory(category));
    }
    read_value(br, category)
}

/// Decodes the AC coefficients of a block into `coefficients[1..]`, in
/// zig-zag order. Positions not written stay as they are.
pub fn decode_ac(
    br: &mut BitReader,
    tree: &HuffmanTree,
    coefficients: &mut [i32; BLOCK_SIZE],
) -> Result<()> {
    let mut k = 1;
    while k < BLOCK_SIZE {
        let symbol = tree.decode(br)?;
        match symbol {
            END_OF_BLOCK => break,
            ZERO_RUN_LENGTH => k += 16,
            _ => {
                let run = usize::from(symbol >> 4);
                let category = symbol & 0x0F;
                // A run past the last coefficient ends the block.
                if k + run >= BLOCK_SIZE {
                    break;
                }
                k += run;
                coefficients[k] = read_value(br, category)?;
                k += 1;
            }
        }
    }
    Ok(())
}

/// Decodes one block of quantized coefficients in zig-zag order, updating
/// the component's DC `predictor`.
pub fn decode_block(
    br: &mut BitReader,
    dc_tree: &HuffmanTree,
    ac_tree: &HuffmanTree,
    predictor: &mut i32,
) -> Result<[i32; BLOCK_SIZE]> {
    let mut coefficients = [0; BLOCK_SIZE];
    *predictor = predictor.wrapping_add(decode_dc_diff(br, dc_tree)?);
    coefficients[0] = *predictor;
    decode_ac(br, ac_tree, &mut coefficients)?;
    Ok(coefficients)
}
