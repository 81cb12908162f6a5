// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Logging macros that forward to `tracing` when the `tracing` feature is
//! enabled and expand to an empty block otherwise.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    // The underscore names avoid clashing with the built-in `warn` attribute.
    #[allow(unused_macros)]
    macro_rules! debug_ {
        ($($_:tt)*) => {{}};
    }
    #[allow(unused_macros)]
    macro_rules! error_ {
        ($($_:tt)*) => {{}};
    }
    #[allow(unused_macros)]
    macro_rules! info_ {
        ($($_:tt)*) => {{}};
    }
    #[allow(unused_macros)]
    macro_rules! trace_ {
        ($($_:tt)*) => {{}};
    }
    #[allow(unused_macros)]
    macro_rules! warn_ {
        ($($_:tt)*) => {{}};
    }
    #[allow(unused_imports)]
    pub(crate) use debug_ as debug;
    #[allow(unused_imports)]
    pub(crate) use error_ as error;
    #[allow(unused_imports)]
    pub(crate) use info_ as info;
    #[allow(unused_imports)]
    pub(crate) use trace_ as trace;
    #[allow(unused_imports)]
    pub(crate) use warn_ as warn;
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use noop::*;

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn describe(value: Option<u8>) -> u8 {
        match value {
            Some(v) => {
                debug!(v, "some");
                v
            }
            None => {
                warn!("none");
                0
            }
        }
    }

    #[test]
    fn macros_work_as_statements_and_expressions() {
        let kind = 3u8;
        match kind {
            0 => info!("zero"),
            1 => error!(kind, "one"),
            _ => trace!(kind, "ignored"),
        }
        assert_eq!(describe(Some(4)), 4);
        assert_eq!(describe(None), 0);
    }
}
