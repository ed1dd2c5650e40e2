#![allow(clippy::new_without_default)]

//! Storage for voxel models and the sparse voxel octree (SVO) that compiles them into a flat, GPU-traversable form.
//!
//! The source types are:
//!   - `SparseVoxelModel`: a hash map from points to materials, the simplest `VoxelModel`
//!   - `BrickMap`: a hash map from brick origins to packed 2x2x2 `Brick`s, which is both a `VoxelModel` and a `BrickModel`
//!
//! Any type implementing `VoxelModel` can be compiled into a `SparseVoxelOctree` with an `SvoBuilder`. The octree is
//! immutable once built; it answers point and brick queries, enumerates its voxels and bricks, and can be packed into an
//! RGBA8 `SvoTexture` for upload to the GPU.

pub mod access;
pub mod brick_map;
pub mod error;
pub mod sparse_model;
pub mod svo;

pub use access::*;
pub use brick_map::*;
pub use error::*;
pub use sparse_model::*;
pub use svo::*;

// Hash types to use for small keys like `Point3i`.
pub type SmallKeyHashMap<K, V> = ahash::AHashMap<K, V>;

pub mod prelude {
    pub use super::{
        BrickMap, BrickModel, NodeKind, NodeWord, SparseVoxelModel, SparseVoxelOctree, SvoBuilder,
        SvoError, SvoResult, SvoStats, SvoTexture, TextureHeader, VoxelModel,
    };
}
