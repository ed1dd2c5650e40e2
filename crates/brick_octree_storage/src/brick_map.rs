use crate::{BrickModel, SmallKeyHashMap, VoxelModel};

use brick_octree_core::prelude::*;
use brick_octree_core::{brick_lane, brick_origin};

/// A model that stores packed 2x2x2 `Brick`s keyed by their origin. It implements both `VoxelModel` and `BrickModel`, so an
/// `SvoBuilder` can insert whole bricks from it.
#[derive(Clone, Debug, Default)]
pub struct BrickMap {
    shape: Point3i,
    bricks: SmallKeyHashMap<Point3i, Brick>,
}

impl BrickMap {
    pub fn new(shape: Point3i) -> Self {
        Self {
            shape,
            bricks: Default::default(),
        }
    }

    /// Copy all voxels of `model` into bricks.
    pub fn from_model(model: &impl VoxelModel) -> Self {
        let mut map = Self::new(model.shape());
        model.for_each_voxel(|p, m| map.set_material(p, m));

        map
    }

    #[inline]
    pub fn shape(&self) -> Point3i {
        self.shape
    }

    /// Replace the brick containing `p`. An empty brick removes the entry.
    pub fn insert_brick(&mut self, p: Point3i, brick: Brick) -> Option<Brick> {
        let origin = brick_origin(p);
        if brick.is_empty() {
            self.bricks.remove(&origin)
        } else {
            self.bricks.insert(origin, brick)
        }
    }

    /// Write a single lane of the brick containing `p`. Writes outside of the shape are ignored.
    pub fn set_material(&mut self, p: Point3i, material: Material) {
        if !Extent3i::from_shape(self.shape).contains(p) {
            return;
        }

        let origin = brick_origin(p);
        let brick = self.bricks.get(&origin).copied().unwrap_or_default();
        self.insert_brick(origin, brick.with_lane(brick_lane(p), material));
    }

    #[inline]
    pub fn brick(&self, p: Point3i) -> Brick {
        self.bricks
            .get(&brick_origin(p))
            .copied()
            .unwrap_or_default()
    }

    /// The number of non-empty bricks.
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}

impl VoxelModel for BrickMap {
    fn shape(&self) -> Point3i {
        self.shape
    }

    fn get_material(&self, p: Point3i) -> Material {
        self.brick(p).lane(brick_lane(p))
    }

    fn for_each_voxel<F>(&self, mut f: F)
    where
        F: FnMut(Point3i, Material),
    {
        for (origin, brick) in self.bricks.iter() {
            for lane in 0..8 {
                let m = brick.lane(lane);
                if m != EMPTY_MATERIAL {
                    f(*origin + Point3i::CUBE_CORNER_OFFSETS[lane as usize], m);
                }
            }
        }
    }

    fn as_brick_model(&self) -> Option<&dyn BrickModel> {
        Some(self)
    }
}

impl BrickModel for BrickMap {
    fn shape(&self) -> Point3i {
        self.shape
    }

    fn get_brick(&self, p: Point3i) -> Brick {
        self.brick(p)
    }

    fn visit_bricks(&self, visitor: &mut dyn FnMut(Point3i, Brick)) {
        for (origin, brick) in self.bricks.iter() {
            visitor(*origin, *brick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseVoxelModel;

    #[test]
    fn lanes_follow_octant_order() {
        let mut map = BrickMap::new(Point3i::fill(4));
        map.set_material(PointN([3, 2, 3]), 9);
        map.set_material(PointN([2, 2, 2]), 4);

        assert_eq!(map.len(), 1);
        assert_eq!(map.brick(PointN([2, 3, 2])).0, 0x0000_0900_0000_0004);
        assert_eq!(map.get_material(PointN([3, 2, 3])), 9);
    }

    #[test]
    fn voxels_match_source_model() {
        let mut model = SparseVoxelModel::new(PointN([5, 3, 4]));
        model.insert(PointN([4, 2, 3]), 1);
        model.insert(PointN([0, 0, 0]), 2);
        model.insert(PointN([1, 1, 1]), 3);

        let map = BrickMap::from_model(&model);
        assert_eq!(map.len(), 2);

        let mut voxels = Vec::new();
        map.for_each_voxel(|p, m| voxels.push((p, m)));
        voxels.sort_by_key(|(p, _)| p.0);

        let mut expected: Vec<_> = model.iter().collect();
        expected.sort_by_key(|(p, _)| p.0);

        assert_eq!(voxels, expected);
    }

    #[test]
    fn clearing_every_lane_removes_brick() {
        let mut map = BrickMap::new(Point3i::fill(2));
        map.set_material(Point3i::ZERO, 1);
        map.set_material(Point3i::ZERO, EMPTY_MATERIAL);

        assert!(map.is_empty());
        assert!(map.as_brick_model().is_some());
    }
}
