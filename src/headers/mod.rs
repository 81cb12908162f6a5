// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod component;
pub mod frame_header;
pub mod restart_interval;
pub mod scan_header;

pub use component::ComponentRole;
pub use frame_header::{FrameComponent, FrameHeader};
pub use restart_interval::read_restart_interval;
pub use scan_header::{ScanComponent, ScanHeader};

use crate::error::{Error, Result};

/// Frames and scans declare between 1 and 4 components.
pub const MAX_COMPONENTS: u8 = 4;

fn check_component_count(count: u8) -> Result<u8> {
    if (1..=MAX_COMPONENTS).contains(&count) {
        Ok(count)
    } else {
        Err(Error::InvalidComponentCount(count))
    }
}
