use brick_octree_core::Material;

use bytemuck::{Pod, Zeroable};

/// Set on internal nodes.
pub const FLAG_INTERNAL: u32 = 1 << 31;
/// Set on leaves whose materials live in the payload array.
pub const FLAG_BRICK: u32 = 1 << 30;

const CHILD_MASK_BITS: u32 = 0xFF;
const BASE_SHIFT: u32 = 8;
const BASE_BITS: u32 = 0x7F_FFFF;
const PAYLOAD_BITS: u32 = 0x3FFF_FFFF;

/// A child base index must fit in 23 bits.
pub const MAX_NODE_COUNT: usize = 1 << 23;
/// A payload index must fit in 30 bits.
pub const MAX_PAYLOAD_COUNT: usize = 1 << 30;

/// One entry of the node array.
///
/// ```text
/// internal:      1 | base index (23 bits) | child mask (8 bits)
/// uniform leaf:  0 | 0 | unused (22 bits) | material (8 bits)
/// brick leaf:    0 | 1 | payload index (30 bits)
/// ```
///
/// The all-zero word is a uniform leaf of empty material, which is also how a childless internal node is written.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct NodeWord(pub u32);

/// A decoded `NodeWord`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Internal { child_mask: u8, base: u32 },
    Uniform(Material),
    Brick(u32),
}

impl NodeWord {
    pub const EMPTY: Self = NodeWord(0);

    #[inline]
    pub fn internal(child_mask: u8, base: u32) -> Self {
        debug_assert!(base <= BASE_BITS);

        NodeWord(FLAG_INTERNAL | ((base & BASE_BITS) << BASE_SHIFT) | child_mask as u32)
    }

    #[inline]
    pub fn uniform(material: Material) -> Self {
        NodeWord(material as u32)
    }

    #[inline]
    pub fn brick(payload_index: u32) -> Self {
        debug_assert!(payload_index <= PAYLOAD_BITS);

        NodeWord(FLAG_BRICK | (payload_index & PAYLOAD_BITS))
    }

    #[inline]
    pub fn is_internal(self) -> bool {
        self.0 & FLAG_INTERNAL != 0
    }

    #[inline]
    pub fn is_leaf(self) -> bool {
        !self.is_internal()
    }

    #[inline]
    pub fn kind(self) -> NodeKind {
        if self.is_internal() {
            NodeKind::Internal {
                child_mask: (self.0 & CHILD_MASK_BITS) as u8,
                base: (self.0 >> BASE_SHIFT) & BASE_BITS,
            }
        } else if self.0 & FLAG_BRICK != 0 {
            NodeKind::Brick(self.0 & PAYLOAD_BITS)
        } else {
            NodeKind::Uniform(self.0 as Material)
        }
    }

    /// For an internal node, the index of the child in `octant`, if that child exists.
    #[inline]
    pub fn child_index(self, octant: u8) -> Option<usize> {
        match self.kind() {
            NodeKind::Internal { child_mask, base } => {
                child_slot(child_mask, octant).map(|slot| base as usize + slot as usize)
            }
            _ => None,
        }
    }
}

impl From<u32> for NodeWord {
    #[inline]
    fn from(word: u32) -> Self {
        NodeWord(word)
    }
}

/// The position of the child for `octant` among the present children, or `None` if `child_mask` doesn't have it.
#[inline]
pub fn child_slot(child_mask: u8, octant: u8) -> Option<u32> {
    let mask = child_mask as u32;
    let bit = 1 << octant as u32;
    if mask & bit == 0 {
        return None;
    }

    Some((mask & (bit - 1)).count_ones())
}
