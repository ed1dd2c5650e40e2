//! Compiles sparse voxel models into a sparse voxel octree (SVO) that a GPU shader can traverse directly.
//!
//! This library is organized into two crates:
//! - **core**: lattice points, extents, octants, and the packed 2x2x2 `Brick`
//! - **storage**: voxel models, and the `SparseVoxelOctree` built from them
//!
//! ```
//! use brick_octree::prelude::*;
//!
//! let mut model = SparseVoxelModel::new(Point3i::fill(64));
//! model.fill_extent(&Extent3i::from_min_and_shape(Point3i::fill(8), Point3i::fill(16)), 3);
//!
//! let svo = SparseVoxelOctree::from_model(&model).unwrap();
//! assert_eq!(svo.get(PointN([10, 20, 12])), 3);
//!
//! // Ship it to the GPU as an RGBA8 texture, and read it back.
//! let texture = svo.to_texture();
//! assert_eq!(SparseVoxelOctree::from_texture(&texture).unwrap(), svo);
//! ```

pub use brick_octree_core as core;
pub use brick_octree_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
}
