// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use num_traits::Num;

pub fn abs_delta<T: Num + std::cmp::PartialOrd>(left_val: T, right_val: T) -> T {
    if left_val > right_val {
        left_val - right_val
    } else {
        right_val - left_val
    }
}

macro_rules! assert_all_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        let (left_val, right_val, max_error) = (&$left, &$right, &$max_error);
        if left_val.len() != right_val.len() {
            panic!("assertion failed: `(left ≈ right)`\n left.len(): `{}`,\n right.len(): `{}`", left_val.len(), right_val.len());
        }
        for index in 0..left_val.len() {
            match $crate::util::test::abs_delta(left_val[index], right_val[index]).partial_cmp(max_error) {
                Some(std::cmp::Ordering::Greater) | None =>  panic!(
                    "assertion failed: `(left ≈ right)`\n left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`,\n left[{}]: `{}`,\n right[{}]: `{}`",
                    left_val, right_val, max_error, index, left_val[index], index, right_val[index]
                ),
                _ => {}
            }
        }
    };
}
pub(crate) use assert_all_almost_eq;

/// Wraps one segment between SOI and EOI markers.
pub fn single_segment_file(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut buffer = vec![0xFF, 0xD8, 0xFF, marker];
    buffer.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
    buffer.extend_from_slice(payload);
    buffer.extend_from_slice(&[0xFF, 0xD9]);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_delta() {
        assert_eq!(abs_delta(3, 5), 2);
        assert_eq!(abs_delta(5u8, 3), 2);
    }

    #[test]
    fn test_all_almost_eq() {
        assert_all_almost_eq!([1.0, 2.0], [1.05, 1.95], 0.1);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch() {
        assert_all_almost_eq!([1.0, 2.0][..], [1.0][..], 0.1);
    }

    #[test]
    #[should_panic]
    fn test_nan_comparison() {
        assert_all_almost_eq!([f64::NAN], [f64::NAN], 0.1);
    }
}
