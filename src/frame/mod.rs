// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod coeff_order;
pub mod quantizer;

use crate::bit_reader::BitReader;
use crate::entropy_coding::decode::decode_block;
use crate::entropy_coding::huffman::{HuffmanTables, HuffmanTree, TableClass};
use crate::error::Result;
use crate::headers::{FrameComponent, FrameHeader, ScanHeader};
use crate::image::{Raster, SamplePlane};
use crate::render::composite;
use crate::util::tracing_wrappers::*;
use crate::var_dct::idct::InverseDct;
use crate::var_dct::level_shift;
use crate::BLOCK_DIM;
use quantizer::{QuantizationTable, QuantizationTables};

/// Samples of blocks no scan has coded: the transform of an all-zero block.
const UNCODED_SAMPLE: u8 = 128;

/// Everything a scan needs to decode the blocks of one of its components.
struct ScanComponentState<'a> {
    plane: usize,
    component: FrameComponent,
    dc_tree: &'a HuffmanTree,
    ac_tree: &'a HuffmanTree,
    quant_table: &'a QuantizationTable,
}

/// Tables and settings in effect when a scan starts.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub huffman_tables: &'a HuffmanTables,
    pub quant_tables: &'a QuantizationTables,
    /// MCUs between restart markers, 0 if restart markers are not used.
    pub restart_interval: u16,
}

/// A frame being decoded: its header and one sample plane per component,
/// filled in by the scans.
#[derive(Debug)]
pub struct Frame {
    header: FrameHeader,
    planes: Vec<SamplePlane>,
    idct: InverseDct,
}

impl Frame {
    pub fn new(header: FrameHeader) -> Result<Frame> {
        let (mcu_cols, mcu_rows) = header.mcu_grid();
        let planes = header
            .components
            .iter()
            .map(|c| {
                let size = (
                    mcu_cols * usize::from(c.sampling_factor_horizontal) * BLOCK_DIM,
                    mcu_rows * usize::from(c.sampling_factor_vertical) * BLOCK_DIM,
                );
                SamplePlane::new(size, UNCODED_SAMPLE)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Frame {
            header,
            planes,
            idct: InverseDct::new(),
        })
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// One plane per frame component, in declaration order.
    pub fn planes(&self) -> &[SamplePlane] {
        &self.planes
    }

    /// Decodes the entropy-coded `data` of a scan into the planes of the
    /// components it codes.
    pub fn decode_scan(
        &mut self,
        scan: &ScanHeader,
        data: &[u8],
        context: ScanContext,
    ) -> Result<()> {
        let components = scan
            .components
            .iter()
            .map(|sc| {
                let plane = self.header.component_index(sc.id)?;
                let component = self.header.components[plane];
                Ok(ScanComponentState {
                    plane,
                    component,
                    dc_tree: context.huffman_tables.get(TableClass::Dc, sc.dc_table)?,
                    ac_tree: context.huffman_tables.get(TableClass::Ac, sc.ac_table)?,
                    quant_table: context.quant_tables.get(component.quantization_table)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let mut predictors = vec![0i32; components.len()];

        // A single component is coded one block per MCU over its own block
        // grid. Several components are interleaved, each MCU holding h x v
        // blocks of every component.
        let interleaved = scan.is_interleaved();
        let (mcu_cols, mcu_rows) = if interleaved {
            self.header.mcu_grid()
        } else {
            self.header.component_block_grid(&components[0].component)
        };
        let restart_interval = usize::from(context.restart_interval);
        debug!(
            components = components.len(),
            mcu_cols, mcu_rows, restart_interval, "decoding scan"
        );

        let mut br = BitReader::new(data);
        for mcu in 0..mcu_cols * mcu_rows {
            let (mx, my) = (mcu % mcu_cols, mcu / mcu_cols);
            let mut restarted = false;
            for (state, predictor) in components.iter().zip(0..) {
                let (h, v) = if interleaved {
                    (
                        usize::from(state.component.sampling_factor_horizontal),
                        usize::from(state.component.sampling_factor_vertical),
                    )
                } else {
                    (1, 1)
                };
                for by in my * v..(my + 1) * v {
                    for bx in mx * h..(mx + 1) * h {
                        let restart = br.skip_restart_markers();
                        if restart.is_some() {
                            trace!(?restart, mcu, "restart marker, resetting DC predictors");
                            predictors.fill(0);
                            restarted = true;
                        }
                        let coefficients = decode_block(
                            &mut br,
                            state.dc_tree,
                            state.ac_tree,
                            &mut predictors[predictor],
                        )?;
                        let samples = self
                            .idct
                            .transform(&state.quant_table.dequantize(&coefficients));
                        self.planes[state.plane].store_block(bx, by, &level_shift(&samples));
                    }
                }
            }
            if restart_interval != 0 && mcu != 0 && mcu % restart_interval == 0 && !restarted {
                warn!(mcu, "no restart marker at the start of a restart interval");
            }
        }
        Ok(())
    }

    /// Converts the planes to an RGBA raster covering whole blocks.
    pub fn render(&self) -> Result<Raster> {
        composite(&self.header, &self.planes)
    }
}
