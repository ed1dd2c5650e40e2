//! A `Brick` is the finest granularity addressed by the octree: a 2x2x2 group of voxels whose 8 materials are packed into a
//! single `u64`, one byte per octant-in-brick. The least significant byte holds octant 0.
//!
//! ```
//! use brick_octree_core::Brick;
//!
//! let brick = Brick::EMPTY.with_lane(3, 7).with_lane(5, 2);
//! assert_eq!(brick.0, 0x0000_0200_0700_0000);
//! assert_eq!(brick.lane(3), 7);
//! assert_eq!(brick.uniform_material(), None);
//!
//! assert_eq!(Brick::broadcast(9).uniform_material(), Some(9));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A one-byte material index. Material 0 is empty space.
pub type Material = u8;

pub const EMPTY_MATERIAL: Material = 0;

/// The edge length of a brick, in voxels.
pub const BRICK_EDGE_LENGTH: i32 = 2;

/// Multiplying a byte by this value repeats it in all 8 lanes.
const LANE_BROADCAST: u64 = 0x0101_0101_0101_0101;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[repr(transparent)]
pub struct Brick(pub u64);

impl Brick {
    pub const EMPTY: Self = Brick(0);

    /// A brick with `material` in all 8 lanes.
    #[inline]
    pub const fn broadcast(material: Material) -> Self {
        Brick(material as u64 * LANE_BROADCAST)
    }

    #[inline]
    pub fn from_materials(materials: [Material; 8]) -> Self {
        Brick(u64::from_le_bytes(materials))
    }

    #[inline]
    pub fn materials(&self) -> [Material; 8] {
        self.0.to_le_bytes()
    }

    /// The material of octant `lane`, where `lane < 8` has the binary format `0bZYX`.
    #[inline]
    pub fn lane(&self, lane: u8) -> Material {
        debug_assert!(lane < 8);

        (self.0 >> (lane as u32 * 8)) as Material
    }

    /// Replace the material of octant `lane`. The previous byte is overwritten, not combined.
    #[inline]
    pub fn with_lane(self, lane: u8, material: Material) -> Self {
        debug_assert!(lane < 8);

        let shift = lane as u32 * 8;
        Brick((self.0 & !(0xFF << shift)) | ((material as u64) << shift))
    }

    #[inline]
    pub fn set_lane(&mut self, lane: u8, material: Material) {
        *self = self.with_lane(lane, material);
    }

    /// Returns `true` iff all 8 lanes hold the same material.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.0 == (self.0 & 0xFF) * LANE_BROADCAST
    }

    /// The shared material of all 8 lanes, if there is one.
    #[inline]
    pub fn uniform_material(&self) -> Option<Material> {
        if self.is_uniform() {
            Some(self.0 as Material)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Brick {
    #[inline]
    fn from(payload: u64) -> Self {
        Brick(payload)
    }
}

impl From<Brick> for u64 {
    #[inline]
    fn from(brick: Brick) -> Self {
        brick.0
    }
}
