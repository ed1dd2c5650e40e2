//! The core data types for addressing voxels in a brick octree:
//! - `PointN`: a lattice point, most importantly `Point3i`
//! - `ExtentN`: an axis-aligned box of lattice points, most importantly `Extent3i`
//! - `Octant`: the cube covered by a single octree node
//! - `Brick`: the 8 materials of a 2x2x2 group of voxels, packed into a `u64`

pub mod brick;
pub mod extent;
pub mod octant;
pub mod point;

pub use brick::{Brick, Material, BRICK_EDGE_LENGTH, EMPTY_MATERIAL};
pub use extent::{Extent3PointIter, Extent3i, ExtentN};
pub use octant::{brick_lane, brick_origin, child_octant_index, Octant};
pub use point::{Point3i, PointN};

pub mod prelude {
    pub use super::{
        Brick, Extent3i, ExtentN, Material, Octant, Point3i, PointN, BRICK_EDGE_LENGTH,
        EMPTY_MATERIAL,
    };
}
