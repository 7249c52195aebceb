//! Transform Hierarchy
//!
//! Nodes live in a [`SlotMap`] arena and reference their parent by handle.
//! World-space values are resolved by walking from a node up to its root and
//! folding the chain back down, so no recursion is involved.
//!
//! Cycles cannot be built: [`TransformHierarchy::set_parent`] rejects any
//! link that would make a node its own ancestor.
//!
//! # World-space queries
//!
//! [`world_matrix`](TransformHierarchy::world_matrix) composes full local
//! matrices. [`world_position`](TransformHierarchy::world_position),
//! [`world_rotation`](TransformHierarchy::world_rotation) and
//! [`world_scale`](TransformHierarchy::world_scale) are separate
//! accumulations: position offsets are rotated by the parent's accumulated
//! rotation but not scaled, so under non-unit parent scale they differ from
//! decomposing the world matrix.

use glam::{Mat4, Quat, Vec3};
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;

use crate::errors::{KinemaError, Result};
use crate::frame::{DrawSink, Material};
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

/// Node-to-root chain. Most rigs are shallow.
type Chain = SmallVec<[NodeHandle; 16]>;

#[derive(Debug, Default)]
pub struct TransformHierarchy {
    nodes: SlotMap<NodeHandle, Node>,
    /// Insertion order, used for iteration and batch evaluation.
    order: Vec<NodeHandle>,
}

impl TransformHierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Handles in insertion order.
    #[must_use]
    pub fn handles(&self) -> &[NodeHandle] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.order.iter().map(|&h| (h, &self.nodes[h]))
    }

    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle)
            .ok_or(KinemaError::NodeNotFound(handle))
    }

    // ========================================================================
    // Construction
    // ========================================================================

    pub fn add_root(&mut self, transform: Transform) -> NodeHandle {
        let handle = self.nodes.insert(Node::new(transform));
        self.order.push(handle);
        handle
    }

    pub fn add_child(&mut self, parent: NodeHandle, transform: Transform) -> Result<NodeHandle> {
        self.insert(Node::new(transform), Some(parent))
    }

    /// Inserts a prepared node under `parent` (or as a root).
    ///
    /// A freshly inserted node has no descendants, so this can never close a
    /// cycle.
    pub fn insert(&mut self, mut node: Node, parent: Option<NodeHandle>) -> Result<NodeHandle> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        node.parent = parent;
        let handle = self.nodes.insert(node);
        self.order.push(handle);
        Ok(handle)
    }

    /// Re-parents `child`, or makes it a root with `None`.
    pub fn set_parent(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> Result<()> {
        self.node(child)?;

        if let Some(parent) = parent {
            self.node(parent)?;

            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == child {
                    log::warn!("Rejected re-parenting {child:?} under its descendant {parent:?}");
                    return Err(KinemaError::CyclicParent { child, parent });
                }
                cursor = self.nodes[current].parent;
            }
        }

        self.nodes[child].parent = parent;
        log::debug!("Re-parented {child:?} under {parent:?}");
        Ok(())
    }

    /// Removes a node. Its children become roots.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<Node> {
        let node = self
            .nodes
            .remove(handle)
            .ok_or(KinemaError::NodeNotFound(handle))?;
        self.order.retain(|&h| h != handle);

        for orphan in self.nodes.values_mut() {
            if orphan.parent == Some(handle) {
                orphan.parent = None;
            }
        }
        Ok(node)
    }

    pub fn parent(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        Ok(self.node(handle)?.parent)
    }

    /// Direct children, in insertion order.
    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        self.iter()
            .filter(|(_, node)| node.parent == Some(handle))
            .map(|(h, _)| h)
            .collect()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// `handle` followed by its ancestors, ending at the root.
    fn chain(&self, handle: NodeHandle) -> Result<Chain> {
        let mut chain = Chain::new();
        let mut cursor = Some(handle);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.node(current)?.parent;
            debug_assert!(chain.len() <= self.nodes.len(), "parent cycle in hierarchy");
        }
        Ok(chain)
    }

    pub fn local_matrix(&self, handle: NodeHandle) -> Result<Mat4> {
        Ok(self.node(handle)?.transform.local_matrix())
    }

    /// `world(parent) * local(node)`; a root's world matrix is exactly its
    /// local matrix.
    pub fn world_matrix(&self, handle: NodeHandle) -> Result<Mat4> {
        let chain = self.chain(handle)?;
        let mut links = chain.iter().rev().map(|&h| self.nodes[h].transform.local_matrix());
        let root = links.next().unwrap_or(Mat4::IDENTITY);
        Ok(links.fold(root, |world, local| world * local))
    }

    /// Product of local rotations from the root down.
    pub fn world_rotation(&self, handle: NodeHandle) -> Result<Quat> {
        let chain = self.chain(handle)?;
        let mut links = chain.iter().rev().map(|&h| self.nodes[h].transform.rotation);
        let root = links.next().unwrap_or(Quat::IDENTITY);
        Ok(links.fold(root, |world, local| world * local))
    }

    /// Root position plus each descendant offset rotated by the accumulated
    /// rotation of its parent. Parent scale is not applied.
    pub fn world_position(&self, handle: NodeHandle) -> Result<Vec3> {
        let chain = self.chain(handle)?;
        let mut links = chain.iter().rev().map(|&h| &self.nodes[h].transform);
        let Some(root) = links.next() else {
            return Ok(Vec3::ZERO);
        };

        let (position, _) = links.fold((root.position, root.rotation), |(pos, rot), local| {
            (pos + rot * local.position, rot * local.rotation)
        });
        Ok(position)
    }

    /// Componentwise product of local scales from the root down.
    pub fn world_scale(&self, handle: NodeHandle) -> Result<Vec3> {
        let chain = self.chain(handle)?;
        let mut links = chain.iter().rev().map(|&h| self.nodes[h].transform.scale);
        let root = links.next().unwrap_or(Vec3::ONE);
        Ok(links.fold(root, |world, local| world * local))
    }

    /// World matrices of every node, each parent evaluated once.
    ///
    /// Values are identical to calling [`world_matrix`](Self::world_matrix)
    /// per node.
    #[must_use]
    pub fn world_matrices(&self) -> SecondaryMap<NodeHandle, Mat4> {
        let mut resolved: SecondaryMap<NodeHandle, Mat4> = SecondaryMap::with_capacity(self.nodes.len());
        let mut pending = Chain::new();

        for &handle in &self.order {
            if resolved.contains_key(handle) {
                continue;
            }

            // Climb until a resolved ancestor or the root.
            pending.clear();
            let mut cursor = Some(handle);
            let mut base = None;
            while let Some(current) = cursor {
                if let Some(&world) = resolved.get(current) {
                    base = Some(world);
                    break;
                }
                pending.push(current);
                cursor = self.nodes[current].parent;
            }

            for &current in pending.iter().rev() {
                let local = self.nodes[current].transform.local_matrix();
                let world = match base {
                    Some(parent_world) => parent_world * local,
                    None => local,
                };
                resolved.insert(current, world);
                base = Some(world);
            }
        }

        resolved
    }

    /// Issues one draw per node, in insertion order, with its world matrix.
    pub fn draw(&self, sink: &mut impl DrawSink, material: &Material) {
        let worlds = self.world_matrices();
        for &handle in &self.order {
            sink.draw(&worlds[handle], material);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_hierarchy_update() {
        let mut hierarchy = TransformHierarchy::new();

        let parent = hierarchy.add_root(Transform::from_trs(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::IDENTITY,
            Vec3::ONE,
        ));
        let child = hierarchy
            .add_child(
                parent,
                Transform::from_trs(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::ONE),
            )
            .unwrap();

        let world = hierarchy.world_matrix(child).unwrap();
        assert!(approx_vec3(world.w_axis.truncate(), Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut hierarchy = TransformHierarchy::new();
        let a = hierarchy.add_root(Transform::new());
        let b = hierarchy.add_child(a, Transform::new()).unwrap();
        let c = hierarchy.add_child(b, Transform::new()).unwrap();

        assert!(matches!(
            hierarchy.set_parent(a, Some(c)),
            Err(KinemaError::CyclicParent { .. })
        ));
        assert!(hierarchy.set_parent(a, Some(a)).is_err());
        assert_eq!(hierarchy.parent(a).unwrap(), None);
    }

    #[test]
    fn test_batched_matches_single() {
        let mut hierarchy = TransformHierarchy::new();
        let root = hierarchy.add_root(Transform::from_euler_degrees(
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.0, 30.0, 0.0),
            Vec3::splat(1.2),
        ));
        let mut last = root;
        for i in 0..5 {
            last = hierarchy
                .add_child(
                    last,
                    Transform::from_euler_degrees(
                        Vec3::X,
                        Vec3::new(10.0 * i as f32, 0.0, 5.0),
                        Vec3::splat(0.8),
                    ),
                )
                .unwrap();
        }

        let batch = hierarchy.world_matrices();
        for &handle in hierarchy.handles() {
            assert_eq!(batch[handle], hierarchy.world_matrix(handle).unwrap());
        }
    }
}
