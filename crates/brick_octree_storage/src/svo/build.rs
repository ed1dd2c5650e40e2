//! The mutable, pointer-based octree that exists only while building. Nodes live in an arena and refer to their children by
//! arena index, so no node ever owns another.

use super::node::{NodeWord, MAX_NODE_COUNT, MAX_PAYLOAD_COUNT};
use crate::{SvoError, SvoResult};

use brick_octree_core::prelude::*;
use brick_octree_core::{brick_lane, child_octant_index};
use std::collections::VecDeque;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Clone, Copy, Debug)]
enum BuildNode {
    Internal([Option<NodeId>; 8]),
    Leaf(Brick),
}

pub(crate) struct BuildTree {
    max_depth: u8,
    arena: Vec<BuildNode>,
}

impl BuildTree {
    pub fn new(max_depth: u8) -> Self {
        debug_assert!(max_depth >= 1);

        // With a single level, the root cube is one brick.
        let root = if max_depth == 1 {
            BuildNode::Leaf(Brick::EMPTY)
        } else {
            BuildNode::Internal([None; 8])
        };

        Self {
            max_depth,
            arena: vec![root],
        }
    }

    /// Write one lane of the brick containing `p`. The previous material in that lane is replaced.
    pub fn insert_voxel(&mut self, p: Point3i, material: Material) {
        let leaf = self.leaf_for(p);
        if let BuildNode::Leaf(brick) = &mut self.arena[leaf] {
            brick.set_lane(brick_lane(p), material);
        }
    }

    /// Replace the whole brick containing `p`.
    pub fn insert_brick(&mut self, p: Point3i, brick: Brick) {
        let leaf = self.leaf_for(p);
        self.arena[leaf] = BuildNode::Leaf(brick);
    }

    /// Descend from the root to the leaf whose brick contains `p`, creating missing nodes along the way.
    fn leaf_for(&mut self, p: Point3i) -> NodeId {
        let mut node = ROOT;
        for level in 0..self.max_depth - 1 {
            let bit = (self.max_depth - 1 - level) as u32;
            let octant = child_octant_index(p, bit) as usize;
            let is_leaf_level = level + 2 == self.max_depth;

            let next_id = self.arena.len();
            let child = match &mut self.arena[node] {
                BuildNode::Internal(children) => match children[octant] {
                    Some(child) => child,
                    None => {
                        children[octant] = Some(next_id);
                        next_id
                    }
                },
                // Only reachable after pruning, which never happens before all insertions.
                BuildNode::Leaf(_) => return node,
            };
            if child == next_id {
                self.arena.push(if is_leaf_level {
                    BuildNode::Leaf(Brick::EMPTY)
                } else {
                    BuildNode::Internal([None; 8])
                });
            }
            node = child;
        }

        node
    }

    /// Collapse every internal node whose 8 children are uniform leaves of the same material into one uniform leaf, bottom-up.
    /// Returns the number of collapsed nodes.
    pub fn prune(&mut self) -> usize {
        let mut collapsed = 0;

        // Each node is pushed once to expand its children and once more to be checked after them.
        let mut stack = vec![(ROOT, false)];
        while let Some((id, children_done)) = stack.pop() {
            let children = match self.arena[id] {
                BuildNode::Internal(children) => children,
                BuildNode::Leaf(_) => continue,
            };
            if !children_done {
                stack.push((id, true));
                stack.extend(children.iter().flatten().map(|child| (*child, false)));
                continue;
            }
            if let Some(material) = self.shared_material(&children) {
                self.arena[id] = BuildNode::Leaf(Brick::broadcast(material));
                collapsed += 1;
            }
        }

        collapsed
    }

    fn shared_material(&self, children: &[Option<NodeId>; 8]) -> Option<Material> {
        let mut shared = None;
        for child in children.iter() {
            let material = match self.arena[(*child)?] {
                BuildNode::Leaf(brick) => brick.uniform_material()?,
                BuildNode::Internal(_) => return None,
            };
            match shared {
                None => shared = Some(material),
                Some(m) if m != material => return None,
                Some(_) => {}
            }
        }

        shared
    }

    /// Write the tree in breadth-first order, such that the present children of each node are contiguous and in ascending
    /// octant order.
    pub fn flatten(&self) -> SvoResult<(Vec<u32>, Vec<u64>)> {
        let mut nodes = vec![0u32];
        let mut payloads = Vec::new();

        let mut queue = VecDeque::new();
        queue.push_back((ROOT, 0));
        while let Some((id, dest)) = queue.pop_front() {
            let word = match self.arena[id] {
                BuildNode::Leaf(brick) => match brick.uniform_material() {
                    Some(material) => NodeWord::uniform(material),
                    None => {
                        let index = payloads.len();
                        if index >= MAX_PAYLOAD_COUNT {
                            return Err(SvoError::PayloadIndexOverflow(index + 1));
                        }
                        payloads.push(brick.0);
                        NodeWord::brick(index as u32)
                    }
                },
                BuildNode::Internal(children) => {
                    let mut child_mask = 0u8;
                    for (octant, child) in children.iter().enumerate() {
                        if child.is_some() {
                            child_mask |= 1 << octant;
                        }
                    }
                    if child_mask == 0 {
                        NodeWord::EMPTY
                    } else {
                        let base = nodes.len();
                        let end = base + child_mask.count_ones() as usize;
                        if end > MAX_NODE_COUNT {
                            return Err(SvoError::NodeIndexOverflow(end));
                        }
                        nodes.resize(end, 0);
                        for (slot, child) in children.iter().flatten().enumerate() {
                            queue.push_back((*child, base + slot));
                        }
                        NodeWord::internal(child_mask, base as u32)
                    }
                }
            };
            nodes[dest] = word.0;
        }

        Ok((nodes, payloads))
    }
}
