use super::node::{NodeKind, NodeWord};
use super::SparseVoxelOctree;

use brick_octree_core::prelude::*;

impl SparseVoxelOctree {
    /// Visit every non-empty leaf in depth-first order, with children in ascending octant order. Each leaf is given with the
    /// cube it covers and its materials; a uniform leaf is broadcast to all 8 lanes, each lane then covering one eighth of the
    /// cube.
    pub fn visit_leaf_bricks(&self, mut visitor: impl FnMut(Octant, Brick)) {
        let mut stack = vec![(0usize, self.root_octant())];
        while let Some((index, octant)) = stack.pop() {
            let word = match self.nodes.get(index) {
                Some(word) => NodeWord(*word),
                None => continue,
            };
            match word.kind() {
                NodeKind::Uniform(EMPTY_MATERIAL) => {}
                NodeKind::Uniform(material) => visitor(octant, Brick::broadcast(material)),
                NodeKind::Brick(payload) => {
                    let brick = self.payloads.get(payload as usize).copied().unwrap_or(0);
                    if brick != 0 {
                        visitor(octant, Brick(brick));
                    }
                }
                NodeKind::Internal { .. } => {
                    // Push in reverse so that children pop in ascending octant order.
                    for child_octant in (0..8).rev() {
                        if let Some(child) = word.child_index(child_octant) {
                            stack.push((child, octant.child(child_octant)));
                        }
                    }
                }
            }
        }
    }

    /// Visit every non-empty voxel within the declared size, in depth-first octant order.
    pub fn visit_voxels(&self, mut visitor: impl FnMut(Point3i, Material)) {
        let bounds = self.extent();
        self.visit_leaf_bricks(|octant, brick| {
            for lane in 0..8 {
                let material = brick.lane(lane);
                if material == EMPTY_MATERIAL {
                    continue;
                }
                let covered = Extent3i::from(octant.child(lane)).intersection(&bounds);
                for p in covered.iter_points() {
                    visitor(p, material);
                }
            }
        });
    }

    /// Visit every non-empty 2x2x2 brick whose origin lies within the declared size. Uniform leaves that cover more than one
    /// brick are expanded into one broadcast brick per brick origin.
    pub fn visit_bricks(&self, mut visitor: impl FnMut(Point3i, Brick)) {
        let bounds = self.extent();
        self.visit_leaf_bricks(|octant, brick| {
            if octant.is_brick() {
                visitor(octant.minimum(), brick);
                return;
            }

            let covered = Extent3i::from(octant).intersection(&bounds);
            if covered.is_empty() {
                return;
            }
            // Round outward to whole bricks, then walk the brick lattice.
            let min_brick = covered.minimum.right_shift(1);
            let lub_brick = (covered.least_upper_bound() + Point3i::ONES).right_shift(1);
            for b in Extent3i::from_min_and_lub(min_brick, lub_brick).iter_points() {
                visitor(b.left_shift(1), brick);
            }
        });
    }

    pub fn collect_voxels(&self) -> Vec<(Point3i, Material)> {
        let mut voxels = Vec::new();
        self.visit_voxels(|p, m| voxels.push((p, m)));

        voxels
    }

    pub fn collect_bricks(&self) -> Vec<(Point3i, Brick)> {
        let mut bricks = Vec::new();
        self.visit_bricks(|p, b| bricks.push((p, b)));

        bricks
    }
}
