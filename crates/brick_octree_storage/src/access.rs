//! Traits through which an octree reads its source data.
//!
//! Every source is a `VoxelModel`: a declared size plus a sparse mapping from points to materials. Sources that already store
//! their voxels as packed 2x2x2 bricks can also expose a `BrickModel`, and the `SvoBuilder` will prefer it, inserting one brick at
//! a time instead of one voxel at a time.
//!
//! ```
//! use brick_octree_core::prelude::*;
//! use brick_octree_storage::prelude::*;
//!
//! let mut model = SparseVoxelModel::new(Point3i::fill(4));
//! model.insert(PointN([1, 2, 3]), 5);
//!
//! let svo = SparseVoxelOctree::from_model(&model).unwrap();
//! assert_eq!(svo.get_material(PointN([1, 2, 3])), 5);
//!
//! // The octree is a model too, so it can be the source of another octree.
//! let copy = SparseVoxelOctree::from_model(&svo).unwrap();
//! assert_eq!(copy, svo);
//! ```

use auto_impl::auto_impl;
use brick_octree_core::prelude::*;

// ██╗   ██╗ ██████╗ ██╗  ██╗███████╗██╗     ███████╗
// ██║   ██║██╔═══██╗╚██╗██╔╝██╔════╝██║     ██╔════╝
// ██║   ██║██║   ██║ ╚███╔╝ █████╗  ██║     ███████╗
// ╚██╗ ██╔╝██║   ██║ ██╔██╗ ██╔══╝  ██║     ╚════██║
//  ╚████╔╝ ╚██████╔╝██╔╝ ██╗███████╗███████╗███████║
//   ╚═══╝   ╚═════╝ ╚═╝  ╚═╝╚══════╝╚══════╝╚══════╝

#[auto_impl(&, Box)]
pub trait VoxelModel {
    /// The declared size of the model. Every voxel lies in the extent `[0, shape)`.
    fn shape(&self) -> Point3i;

    /// The material at `p`, or `EMPTY_MATERIAL` if nothing is stored there.
    fn get_material(&self, p: Point3i) -> Material;

    /// Visit every non-empty voxel exactly once, in no particular order.
    fn for_each_voxel<F>(&self, f: F)
    where
        F: FnMut(Point3i, Material);

    /// The brick view of this model, if it has one.
    fn as_brick_model(&self) -> Option<&dyn BrickModel> {
        None
    }

    fn extent(&self) -> Extent3i {
        Extent3i::from_shape(self.shape())
    }
}

// ██████╗ ██████╗ ██╗ ██████╗██╗  ██╗███████╗
// ██╔══██╗██╔══██╗██║██╔════╝██║ ██╔╝██╔════╝
// ██████╔╝██████╔╝██║██║     █████╔╝ ███████╗
// ██╔══██╗██╔══██╗██║██║     ██╔═██╗ ╚════██║
// ██████╔╝██║  ██║██║╚██████╗██║  ██╗███████║
// ╚═════╝ ╚═╝  ╚═╝╚═╝ ╚═════╝╚═╝  ╚═╝╚══════╝

/// A model that stores voxels as packed 2x2x2 bricks whose origins have even coordinates.
#[auto_impl(&, Box)]
pub trait BrickModel {
    fn shape(&self) -> Point3i;

    /// The brick containing `p`. The coordinate does not need to be a brick origin.
    fn get_brick(&self, p: Point3i) -> Brick;

    /// Visit every non-empty brick exactly once, in no particular order, along with its origin.
    fn visit_bricks(&self, visitor: &mut dyn FnMut(Point3i, Brick));
}
