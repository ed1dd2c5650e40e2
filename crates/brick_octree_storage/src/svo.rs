//! A sparse voxel octree (SVO) stored as two flat arrays, ready to be uploaded to a GPU and traversed by a shader.
//!
//! # Layout
//!
//! The node array holds one `u32` word per node, with the root at index 0. The children of an internal node are stored
//! contiguously, in ascending octant order, starting at the node's base index; only the children named by its 8-bit child
//! mask are present. The child for octant `i` lives at `base + popcount(mask & ((1 << i) - 1))`. See `NodeWord` for the bit
//! layout.
//!
//! Leaves sit at most `max_depth - 1` levels below the root and always cover a whole 2x2x2 brick or more. A leaf is either a
//! single material for its whole cube, or an index into the payload array, where each `u64` packs the 8 materials of a brick.
//!
//! # Building
//!
//! ```
//! use brick_octree_core::prelude::*;
//! use brick_octree_storage::prelude::*;
//!
//! let mut model = SparseVoxelModel::new(Point3i::fill(4));
//! model.fill_extent(&Extent3i::from_shape(Point3i::fill(4)), 1);
//!
//! // A fully uniform model prunes down to a single leaf.
//! let svo = SvoBuilder::default().build(Some(&model)).unwrap();
//! assert_eq!(svo.nodes(), &[1]);
//! assert!(svo.payloads().is_empty());
//!
//! // Without pruning, the brick leaves are kept.
//! let unpruned = SvoBuilder { prune: false, ..Default::default() }.build(Some(&model)).unwrap();
//! assert_eq!(unpruned.nodes().len(), 9);
//! assert_eq!(unpruned.payloads().len(), 0);
//! ```

mod build;
pub mod node;
mod query;
mod texture;
mod visit;

pub use node::*;
pub use texture::*;

use build::BuildTree;

use crate::{BrickModel, SvoError, SvoResult, VoxelModel};

use brick_octree_core::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable sparse voxel octree. Build one with an `SvoBuilder` or `SparseVoxelOctree::from_model`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct SparseVoxelOctree {
    nodes: Vec<u32>,
    payloads: Vec<u64>,
    size: [u16; 3],
    max_depth: u8,
}

/// Configuration for compiling a `VoxelModel` into a `SparseVoxelOctree`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct SvoBuilder {
    /// Collapse every subtree whose 8 children share one material into a single leaf.
    pub prune: bool,
    /// Insert whole bricks when the model offers a `BrickModel` view.
    pub prefer_bricks: bool,
}

impl Default for SvoBuilder {
    fn default() -> Self {
        Self {
            prune: true,
            prefer_bricks: true,
        }
    }
}

impl SvoBuilder {
    /// Compile `model` into an octree. Fails with `SvoError::MissingModel` if there is no model.
    pub fn build<M>(&self, model: Option<&M>) -> SvoResult<SparseVoxelOctree>
    where
        M: VoxelModel,
    {
        let model = model.ok_or(SvoError::MissingModel)?;

        let size = size_from_shape(model.shape())?;
        let max_depth = max_depth_for_size(size);
        let extent = size_extent(size);

        let span = tracing::debug_span!("build_svo", ?size, max_depth);
        let _enter = span.enter();

        let mut tree = BuildTree::new(max_depth);
        match model.as_brick_model().filter(|_| self.prefer_bricks) {
            Some(bricks) => {
                let mut inserted = 0usize;
                bricks.visit_bricks(&mut |p, brick| {
                    if extent.contains(p) && !brick.is_empty() {
                        tree.insert_brick(p, brick);
                        inserted += 1;
                    }
                });
                tracing::debug!(inserted, "inserted bricks");
            }
            None => {
                let mut inserted = 0usize;
                model.for_each_voxel(|p, material| {
                    if extent.contains(p) && material != EMPTY_MATERIAL {
                        tree.insert_voxel(p, material);
                        inserted += 1;
                    }
                });
                tracing::debug!(inserted, "inserted voxels");
            }
        }

        if self.prune {
            let collapsed = tree.prune();
            tracing::debug!(collapsed, "pruned homogeneous subtrees");
        }

        let (nodes, payloads) = tree.flatten()?;
        tracing::debug!(
            nodes = nodes.len(),
            payloads = payloads.len(),
            "flattened octree"
        );

        Ok(SparseVoxelOctree {
            nodes,
            payloads,
            size,
            max_depth,
        })
    }
}

impl SparseVoxelOctree {
    /// Build with the default `SvoBuilder` configuration.
    pub fn from_model<M>(model: &M) -> SvoResult<Self>
    where
        M: VoxelModel,
    {
        SvoBuilder::default().build(Some(model))
    }

    pub(crate) fn from_raw_parts(
        nodes: Vec<u32>,
        payloads: Vec<u64>,
        size: [u16; 3],
        max_depth: u8,
    ) -> Self {
        Self {
            nodes,
            payloads,
            size,
            max_depth,
        }
    }

    #[inline]
    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    /// The node array viewed as `NodeWord`s.
    #[inline]
    pub fn node_words(&self) -> &[NodeWord] {
        bytemuck::cast_slice(&self.nodes)
    }

    #[inline]
    pub fn payloads(&self) -> &[u64] {
        &self.payloads
    }

    /// The node array as native-endian bytes, for direct upload into a GPU storage buffer.
    #[inline]
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// The payload array as native-endian bytes, for direct upload into a GPU storage buffer.
    #[inline]
    pub fn payload_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.payloads)
    }

    /// The declared size of the source model.
    #[inline]
    pub fn size(&self) -> [u16; 3] {
        self.size
    }

    #[inline]
    pub fn shape(&self) -> Point3i {
        let [x, y, z] = self.size;

        PointN([x as i32, y as i32, z as i32])
    }

    /// The extent `[0, size)`. Queries outside of it return empty.
    #[inline]
    pub fn extent(&self) -> Extent3i {
        size_extent(self.size)
    }

    /// The number of levels, such that the root cube has edge length `2^max_depth`.
    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// The cube covered by the root node.
    #[inline]
    pub fn root_octant(&self) -> Octant {
        Octant::root(self.max_depth)
    }

    /// Counts of each kind of node.
    pub fn stats(&self) -> SvoStats {
        let mut stats = SvoStats {
            payloads: self.payloads.len(),
            ..Default::default()
        };
        for word in self.node_words() {
            match word.kind() {
                NodeKind::Internal { .. } => stats.internal_nodes += 1,
                NodeKind::Uniform(EMPTY_MATERIAL) => stats.empty_leaves += 1,
                NodeKind::Uniform(_) => stats.uniform_leaves += 1,
                NodeKind::Brick(_) => stats.brick_leaves += 1,
            }
        }

        stats
    }
}

/// A summary of the node array of a `SparseVoxelOctree`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SvoStats {
    pub internal_nodes: usize,
    /// Uniform leaves of `EMPTY_MATERIAL`, including the slots of internal nodes that had no children.
    pub empty_leaves: usize,
    pub uniform_leaves: usize,
    pub brick_leaves: usize,
    pub payloads: usize,
}

impl SvoStats {
    pub fn node_count(&self) -> usize {
        self.internal_nodes + self.empty_leaves + self.uniform_leaves + self.brick_leaves
    }

    /// The size of the node and payload arrays.
    pub fn size_in_bytes(&self) -> usize {
        self.node_count() * std::mem::size_of::<u32>() + self.payloads * std::mem::size_of::<u64>()
    }
}

/// The smallest depth `d >= 1` such that `2^d` covers the largest dimension of `size`.
pub fn max_depth_for_size(size: [u16; 3]) -> u8 {
    let max_dim = size.iter().copied().max().unwrap_or(0) as u32;

    let mut depth = 1;
    while (1u32 << depth) < max_dim {
        depth += 1;
    }

    depth
}

fn size_from_shape(shape: Point3i) -> SvoResult<[u16; 3]> {
    let [x, y, z] = shape.0;
    let fits = |c: i32| (0..=u16::MAX as i32).contains(&c);
    if !(fits(x) && fits(y) && fits(z)) {
        return Err(SvoError::InvalidShape(shape));
    }

    Ok([x as u16, y as u16, z as u16])
}

fn size_extent(size: [u16; 3]) -> Extent3i {
    let [x, y, z] = size;

    Extent3i::from_shape(PointN([x as i32, y as i32, z as i32]))
}

impl VoxelModel for SparseVoxelOctree {
    fn shape(&self) -> Point3i {
        SparseVoxelOctree::shape(self)
    }

    fn get_material(&self, p: Point3i) -> Material {
        self.get(p)
    }

    fn for_each_voxel<F>(&self, f: F)
    where
        F: FnMut(Point3i, Material),
    {
        self.visit_voxels(f)
    }

    fn as_brick_model(&self) -> Option<&dyn BrickModel> {
        Some(self)
    }
}

impl BrickModel for SparseVoxelOctree {
    fn shape(&self) -> Point3i {
        SparseVoxelOctree::shape(self)
    }

    fn get_brick(&self, p: Point3i) -> Brick {
        SparseVoxelOctree::get_brick(self, p)
    }

    fn visit_bricks(&self, visitor: &mut dyn FnMut(Point3i, Brick)) {
        SparseVoxelOctree::visit_bricks(self, visitor)
    }
}
