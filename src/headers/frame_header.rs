// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::{check_component_count, ComponentRole};
use crate::error::{Error, Result};
use crate::markers::MarkerSegment;
use crate::util::tracing_wrappers::*;
use crate::BLOCK_DIM;

const MAX_SAMPLING_FACTOR: u8 = 4;

/// Per-component parameters declared in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameComponent {
    pub id: u8,
    /// Colour the component contributes, or `None` for components that are
    /// decoded but not composited.
    pub role: Option<ComponentRole>,
    pub sampling_factor_horizontal: u8,
    pub sampling_factor_vertical: u8,
    pub quantization_table: u8,
}

/// Contents of a baseline DCT start-of-frame (SOF0) segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub precision: u8,
    pub height: u16,
    pub width: u16,
    /// Components in the order the frame header declares them.
    pub components: Vec<FrameComponent>,
}

impl FrameHeader {
    pub fn read(segment: &MarkerSegment) -> Result<FrameHeader> {
        let mut reader = segment.reader();
        let precision = reader.read_u8()?;
        let height = reader.read_u16()?;
        let width = reader.read_u16()?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize(width.into(), height.into()));
        }
        let count = check_component_count(reader.read_u8()?)?;

        let mut components: Vec<FrameComponent> = Vec::with_capacity(count.into());
        for _ in 0..count {
            let id = reader.read_u8()?;
            if components.iter().any(|c| c.id == id) {
                return Err(Error::DuplicateComponentId(id));
            }
            let (horizontal, vertical) = reader.read_nibbles()?;
            let valid = 1..=MAX_SAMPLING_FACTOR;
            if !valid.contains(&horizontal) || !valid.contains(&vertical) {
                return Err(Error::InvalidSamplingFactors(horizontal, vertical));
            }
            components.push(FrameComponent {
                id,
                role: None,
                sampling_factor_horizontal: horizontal,
                sampling_factor_vertical: vertical,
                quantization_table: reader.read_u8()?,
            });
        }

        let ids: Vec<u8> = components.iter().map(|c| c.id).collect();
        for (component, role) in components.iter_mut().zip(ComponentRole::assign(&ids)) {
            component.role = role;
        }

        let header = FrameHeader {
            precision,
            height,
            width,
            components,
        };
        debug!(?header, "read frame header");
        Ok(header)
    }

    pub fn component(&self, id: u8) -> Option<&FrameComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Position of component `id` in the frame's declaration order.
    pub fn component_index(&self, id: u8) -> Result<usize> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::UnknownComponentId(id))
    }

    /// Position of the component carrying `role`, if any.
    pub fn role_index(&self, role: ComponentRole) -> Option<usize> {
        self.components.iter().position(|c| c.role == Some(role))
    }

    /// Largest horizontal and vertical sampling factors over all components.
    pub fn max_sampling_factors(&self) -> (usize, usize) {
        self.components.iter().fold((1, 1), |(h, v), c| {
            (
                h.max(c.sampling_factor_horizontal.into()),
                v.max(c.sampling_factor_vertical.into()),
            )
        })
    }

    /// Width and height rounded up to whole 8x8 blocks.
    pub fn padded_size(&self) -> (usize, usize) {
        (
            usize::from(self.width).div_ceil(BLOCK_DIM) * BLOCK_DIM,
            usize::from(self.height).div_ceil(BLOCK_DIM) * BLOCK_DIM,
        )
    }

    /// Number of MCU columns and rows of an interleaved scan.
    pub fn mcu_grid(&self) -> (usize, usize) {
        let (h_max, v_max) = self.max_sampling_factors();
        (
            usize::from(self.width).div_ceil(BLOCK_DIM * h_max),
            usize::from(self.height).div_ceil(BLOCK_DIM * v_max),
        )
    }

    /// Number of block columns and rows covering `component` on its own, as
    /// iterated by a scan holding only that component.
    pub fn component_block_grid(&self, component: &FrameComponent) -> (usize, usize) {
        let (h_max, v_max) = self.max_sampling_factors();
        let width = (usize::from(self.width) * usize::from(component.sampling_factor_horizontal))
            .div_ceil(h_max);
        let height = (usize::from(self.height) * usize::from(component.sampling_factor_vertical))
            .div_ceil(v_max);
        (width.div_ceil(BLOCK_DIM), height.div_ceil(BLOCK_DIM))
    }
}
