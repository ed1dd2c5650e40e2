use crate::{Extent3i, Point3i, BRICK_EDGE_LENGTH};

/// The cube covered by one node of an octree rooted at the origin. The edge length is a power of 2 and the minimum is a
/// multiple of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Octant {
    minimum: Point3i,
    edge_length: i32,
}

impl Octant {
    /// The cube `[0, 2^depth)` covered by the root of an octree with `depth` levels.
    #[inline]
    pub fn root(depth: u8) -> Self {
        Self {
            minimum: Point3i::ZERO,
            edge_length: 1 << depth as i32,
        }
    }

    #[inline]
    pub fn minimum(&self) -> Point3i {
        self.minimum
    }

    #[inline]
    pub fn edge_length(&self) -> i32 {
        self.edge_length
    }

    /// Returns `true` iff this octant is exactly one 2x2x2 brick.
    #[inline]
    pub fn is_brick(&self) -> bool {
        self.edge_length == BRICK_EDGE_LENGTH
    }

    /// Returns the child octant, where `child_index` specifies the child as a number in `[0..7]` of the binary format `0bZYX`.
    #[inline]
    pub fn child(&self, child_index: u8) -> Self {
        let edge_length = self.edge_length >> 1;

        Self {
            minimum: self.minimum + Point3i::CUBE_CORNER_OFFSETS[child_index as usize] * edge_length,
            edge_length,
        }
    }
}

impl From<Octant> for Extent3i {
    #[inline]
    fn from(octant: Octant) -> Self {
        Extent3i::from_min_and_shape(octant.minimum, Point3i::fill(octant.edge_length))
    }
}

/// Selects the child octant of `p` by reading bit `bit` of each coordinate, as `bit_z << 2 | bit_y << 1 | bit_x`.
#[inline]
pub fn child_octant_index(p: Point3i, bit: u32) -> u8 {
    let x = (p.x() >> bit) & 1;
    let y = (p.y() >> bit) & 1;
    let z = (p.z() >> bit) & 1;

    ((z << 2) | (y << 1) | x) as u8
}

/// The lane of `p` within its brick.
#[inline]
pub fn brick_lane(p: Point3i) -> u8 {
    child_octant_index(p, 0)
}

/// The minimum corner of the brick containing `p`.
#[inline]
pub fn brick_origin(p: Point3i) -> Point3i {
    p.map_components(|c| c & !1)
}
