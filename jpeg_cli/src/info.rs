// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use baseline_jpeg::entropy_coding::huffman::HuffmanTables;
use baseline_jpeg::headers::FrameHeader;
use baseline_jpeg::markers::MarkerSegment;

/// One line per segment: kind, marker, offsets and sizes.
pub fn describe_segments(segments: &[MarkerSegment]) -> Vec<String> {
    segments
        .iter()
        .map(|s| {
            let mut line = format!(
                "{:?} (0xFF{:02X}) at {}: {} bytes",
                s.kind(),
                s.kind().marker(),
                s.segment_offset(),
                s.segment_size()
            );
            if s.kind().has_data() {
                line += &format!(", {} bytes of scan data at {}", s.data_size(), s.data_offset());
            }
            line
        })
        .collect()
}

/// One line per defined Huffman table, with the tree as nested maps.
pub fn describe_tables(tables: &HuffmanTables) -> Vec<String> {
    tables
        .iter()
        .map(|(class, index, tree)| format!("{class:?} table {index}: {tree}"))
        .collect()
}

pub fn describe_frame(header: &FrameHeader) -> Vec<String> {
    let mut lines = vec![format!(
        "Frame: {}x{}, {} component(s)",
        header.width,
        header.height,
        header.components.len()
    )];
    lines.extend(header.components.iter().map(|c| {
        format!(
            "  {} ({}): sampling {}x{}, quantization table {}",
            c.role.map_or("unused", |role| role.name()),
            c.id,
            c.sampling_factor_horizontal,
            c.sampling_factor_vertical,
            c.quantization_table
        )
    }));
    lines
}
