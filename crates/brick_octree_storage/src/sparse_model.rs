use crate::{SmallKeyHashMap, VoxelModel};

use brick_octree_core::prelude::*;

/// A `VoxelModel` that stores one entry per non-empty voxel in a hash map.
///
/// Writes outside of the declared shape are ignored, and writing `EMPTY_MATERIAL` removes the voxel.
#[derive(Clone, Debug, Default)]
pub struct SparseVoxelModel {
    shape: Point3i,
    voxels: SmallKeyHashMap<Point3i, Material>,
}

impl SparseVoxelModel {
    pub fn new(shape: Point3i) -> Self {
        Self {
            shape,
            voxels: Default::default(),
        }
    }

    /// Sample `f` at every point of `[0, shape)`.
    pub fn fill_with(shape: Point3i, mut f: impl FnMut(Point3i) -> Material) -> Self {
        let mut model = Self::new(shape);
        for p in Extent3i::from_shape(shape).iter_points() {
            model.insert(p, f(p));
        }

        model
    }

    /// Set every voxel of `extent` (clipped to the model's shape) to `material`.
    pub fn fill_extent(&mut self, extent: &Extent3i, material: Material) {
        for p in extent.intersection(&self.extent()).iter_points() {
            self.insert(p, material);
        }
    }

    /// Returns the previous material at `p`, if there was one.
    pub fn insert(&mut self, p: Point3i, material: Material) -> Option<Material> {
        if !self.extent().contains(p) {
            return None;
        }

        if material == EMPTY_MATERIAL {
            self.voxels.remove(&p)
        } else {
            self.voxels.insert(p, material)
        }
    }

    pub fn remove(&mut self, p: Point3i) -> Option<Material> {
        self.voxels.remove(&p)
    }

    /// The number of non-empty voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point3i, Material)> + '_ {
        self.voxels.iter().map(|(p, m)| (*p, *m))
    }
}

impl VoxelModel for SparseVoxelModel {
    fn shape(&self) -> Point3i {
        self.shape
    }

    fn get_material(&self, p: Point3i) -> Material {
        self.voxels.get(&p).copied().unwrap_or(EMPTY_MATERIAL)
    }

    fn for_each_voxel<F>(&self, mut f: F)
    where
        F: FnMut(Point3i, Material),
    {
        for (p, m) in self.voxels.iter() {
            f(*p, *m);
        }
    }
}
