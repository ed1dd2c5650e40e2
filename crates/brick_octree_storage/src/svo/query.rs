use super::node::{NodeKind, NodeWord};
use super::SparseVoxelOctree;

use brick_octree_core::prelude::*;
use brick_octree_core::{brick_lane, brick_origin, child_octant_index};

/// The leaf that a descent ended on.
enum LeafHit {
    Uniform(Material),
    Brick(Brick),
}

impl SparseVoxelOctree {
    /// The material at `p`. Points outside of `[0, size)` are empty.
    #[inline]
    pub fn get(&self, p: Point3i) -> Material {
        match self.find_leaf(p) {
            Some(LeafHit::Uniform(material)) => material,
            Some(LeafHit::Brick(brick)) => brick.lane(brick_lane(p)),
            None => EMPTY_MATERIAL,
        }
    }

    /// The 8 materials of the brick containing `p`. A uniform leaf is broadcast to all lanes, and points outside of
    /// `[0, size)` give an empty brick.
    #[inline]
    pub fn get_brick(&self, p: Point3i) -> Brick {
        if !self.contains(p) {
            return Brick::EMPTY;
        }

        match self.find_leaf(brick_origin(p)) {
            Some(LeafHit::Uniform(material)) => Brick::broadcast(material),
            Some(LeafHit::Brick(brick)) => brick,
            None => Brick::EMPTY,
        }
    }

    /// Returns `true` iff `p` lies within the declared size.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.extent().contains(p)
    }

    fn find_leaf(&self, p: Point3i) -> Option<LeafHit> {
        if !self.contains(p) {
            return None;
        }

        let mut index = 0;
        for level in 0..self.max_depth {
            let word = NodeWord(*self.nodes.get(index)?);
            match word.kind() {
                NodeKind::Uniform(material) => return Some(LeafHit::Uniform(material)),
                NodeKind::Brick(payload) => {
                    let payload = *self.payloads.get(payload as usize)?;
                    return Some(LeafHit::Brick(Brick(payload)));
                }
                NodeKind::Internal { .. } => {
                    let bit = (self.max_depth - 1 - level) as u32;
                    index = word.child_index(child_octant_index(p, bit))?;
                }
            }
        }

        None
    }
}
