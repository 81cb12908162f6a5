// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};
use std::{fs, io::ErrorKind, path::Path};

/// Reads a whole input file, mapping failures to the boundary errors
/// [`Error::NoFile`] and [`Error::FileReadError`].
pub fn read_input_file(input_filename: &Path) -> Result<Vec<u8>> {
    fs::read(input_filename).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::NoFile(input_filename.to_path_buf()),
        _ => Error::FileReadError(err),
    })
}
