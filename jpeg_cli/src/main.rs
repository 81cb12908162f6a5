// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use baseline_jpeg::markers::scan_segments;
use baseline_jpeg::util::file_helpers::read_input_file;
use baseline_jpeg::{DecodeOptions, Decoder};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use jpeg_cli::enc::to_png;
use jpeg_cli::info::{describe_frame, describe_segments, describe_tables};

#[derive(Parser)]
#[command(version, about = "Decodes baseline JPEG files")]
struct Opt {
    /// Input JPEG file
    input: PathBuf,

    /// Output PNG file
    output: Option<PathBuf>,

    /// Print the marker segments of the input
    #[clap(long)]
    segments: bool,

    /// Print the Huffman tables as nested maps
    #[clap(long)]
    tables: bool,

    /// Trim the output to the image size instead of whole 8x8 blocks
    #[clap(long)]
    crop: bool,

    /// Maximum number of pixels to decode, 0 for no limit
    #[clap(long)]
    max_pixels: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    let data = read_input_file(&opt.input)?;
    let segments = scan_segments(&data).wrap_err("Invalid JPEG framing")?;
    if opt.segments {
        describe_segments(&segments)
            .iter()
            .for_each(|line| println!("{line}"));
    }

    let options = match opt.max_pixels {
        Some(0) => DecodeOptions::unlimited(),
        Some(max_pixels) => DecodeOptions {
            max_pixels: Some(max_pixels),
        },
        None => DecodeOptions::default(),
    };
    let mut decoder = Decoder::new(options);
    for segment in &segments {
        decoder.process_segment(segment).wrap_err_with(|| {
            format!(
                "Failed to decode {:?} segment at offset {}",
                segment.kind(),
                segment.segment_offset()
            )
        })?;
    }
    if opt.tables {
        describe_tables(decoder.huffman_tables())
            .iter()
            .for_each(|line| println!("{line}"));
    }
    if let Some(header) = decoder.frame_header() {
        describe_frame(header)
            .iter()
            .for_each(|line| println!("{line}"));
    }

    let mut raster = decoder.finish()?;
    if opt.crop {
        raster = raster.cropped()?;
    }
    println!("Decoded {}x{} RGBA raster", raster.width(), raster.height());

    if let Some(output) = opt.output {
        let file = File::create(&output)
            .wrap_err_with(|| format!("Cannot create {}", output.display()))?;
        to_png(&raster, &mut BufWriter::new(file))?;
    }
    Ok(())
}
