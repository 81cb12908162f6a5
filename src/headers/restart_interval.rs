// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::Result;
use crate::markers::MarkerSegment;

/// Reads the number of MCUs between restart markers from a DRI segment. Zero
/// disables restart markers.
pub fn read_restart_interval(segment: &MarkerSegment) -> Result<u16> {
    segment.reader().read_u16()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::Error;
    use crate::markers::{scan_segments, SegmentKind};

    #[test]
    fn reads_interval() -> Result<()> {
        let buffer = [0xFF, 0xD8, 0xFF, 0xDD, 0x00, 0x04, 0x01, 0x02, 0xFF, 0xD9];
        let segments = scan_segments(&buffer)?;
        assert_eq!(read_restart_interval(&segments[1])?, 0x0102);
        Ok(())
    }

    #[test]
    fn truncated() -> Result<()> {
        let buffer = [0xFF, 0xD8, 0xFF, 0xDD, 0x00, 0x03, 0x01, 0xFF, 0xD9];
        let segments = scan_segments(&buffer)?;
        assert!(matches!(
            read_restart_interval(&segments[1]),
            Err(Error::TruncatedSegment(SegmentKind::DefineRestartInterval))
        ));
        Ok(())
    }
}
