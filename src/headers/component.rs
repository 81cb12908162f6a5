// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Colour role of an image component. The discriminants are the JFIF
/// component ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum ComponentRole {
    Luminance = 1,
    ChrominanceBlue = 2,
    ChrominanceRed = 3,
}

impl ComponentRole {
    pub fn from_jfif_id(id: u8) -> Option<ComponentRole> {
        ComponentRole::from_u8(id)
    }

    /// Role of the component declared at `index` when the ids do not follow
    /// the JFIF table.
    pub fn from_position(index: usize) -> Option<ComponentRole> {
        u8::try_from(index + 1).ok().and_then(ComponentRole::from_u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentRole::Luminance => "luminance",
            ComponentRole::ChrominanceBlue => "chrominanceBlue",
            ComponentRole::ChrominanceRed => "chrominanceRed",
        }
    }

    /// Assigns roles to the components of a frame with the given ids, in
    /// declaration order.
    ///
    /// A lone component is luminance. Ids that all come from the JFIF table
    /// select their role by value. Any other set of ids, such as 0-based ids
    /// or a fourth component, falls back to declaration order, leaving
    /// components past the third without a role.
    pub fn assign(ids: &[u8]) -> Vec<Option<ComponentRole>> {
        if ids.len() == 1 {
            return vec![Some(ComponentRole::Luminance)];
        }
        if ids.iter().all(|&id| ComponentRole::from_jfif_id(id).is_some()) {
            ids.iter().map(|&id| ComponentRole::from_jfif_id(id)).collect()
        } else {
            (0..ids.len()).map(ComponentRole::from_position).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    use ComponentRole::*;

    #[test]
    fn jfif_ids() {
        assert_eq!(ComponentRole::from_jfif_id(1), Some(Luminance));
        assert_eq!(ComponentRole::from_jfif_id(2), Some(ChrominanceBlue));
        assert_eq!(ComponentRole::from_jfif_id(3), Some(ChrominanceRed));
        for id in [0, 4, 82, 255] {
            assert_eq!(ComponentRole::from_jfif_id(id), None);
        }
    }

    #[test]
    fn roles_by_id() {
        assert_eq!(
            ComponentRole::assign(&[3, 1, 2]),
            [Some(ChrominanceRed), Some(Luminance), Some(ChrominanceBlue)]
        );
        assert_eq!(
            ComponentRole::assign(&[1, 3]),
            [Some(Luminance), Some(ChrominanceRed)]
        );
    }

    #[test]
    fn roles_by_position() {
        assert_eq!(
            ComponentRole::assign(&[0, 1, 2]),
            [Some(Luminance), Some(ChrominanceBlue), Some(ChrominanceRed)]
        );
        assert_eq!(
            ComponentRole::assign(&[1, 2, 3, 4]),
            [
                Some(Luminance),
                Some(ChrominanceBlue),
                Some(ChrominanceRed),
                None
            ]
        );
        assert_eq!(
            ComponentRole::assign(&[82, 71, 66]),
            [Some(Luminance), Some(ChrominanceBlue), Some(ChrominanceRed)]
        );
    }

    #[test]
    fn lone_component_is_luminance() {
        for id in [0, 1, 2, 200] {
            assert_eq!(ComponentRole::assign(&[id]), [Some(Luminance)]);
        }
    }
}
