// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The arena that owns scene nodes and their parent/child edges.

use lumen_core::math::{Mat4, Quaternion, Vec3};
use lumen_core::scene::NodeId;

use crate::error::SceneError;
use crate::mesh::Mesh;
use crate::transform::Transform;

/// A scene node: a transform and an optional drawable payload.
///
/// The hierarchy fields are private; they are only changed through
/// [`SceneGraph`] so that both sides of every edge stay in sync.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// A free-form label for debugging.
    pub name: Option<String>,
    /// Local and world transform.
    pub transform: Transform,
    /// The drawable payload. A node is drawable iff this is `Some`.
    pub mesh: Option<Mesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates an empty, non-drawable node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debug name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the local position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Attaches a mesh, making the node drawable.
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// The parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children, in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `true` if the node carries a mesh.
    pub fn is_drawable(&self) -> bool {
        self.mesh.is_some()
    }
}

/// What [`SceneGraph::traverse`] should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the node's children next.
    Continue,
    /// Do not descend into the node's children.
    SkipChildren,
}

/// A generational arena of [`Node`]s.
///
/// The graph is the single owner of the hierarchy. Reparenting goes through
/// [`SceneGraph::set_parent`], which keeps a child's back-reference and its
/// parent's children list consistent and rejects cycles.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    slots: Vec<(NodeId, Option<Node>)>,
    free: Vec<u32>,
    len: usize,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Storage ---

    /// Stores a node as a new root and returns its handle.
    ///
    /// Any hierarchy data already present on `node` is discarded.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let (slot_id, slot) = &mut self.slots[index as usize];
            slot_id.generation += 1;
            *slot = Some(node);
            *slot_id
        } else {
            let id = NodeId::new(self.slots.len() as u32, 0);
            self.slots.push((id, Some(node)));
            id
        }
    }

    /// Detaches `id` from its parent and removes it together with its whole
    /// subtree. Returns the removed node with its hierarchy cleared.
    pub fn remove(&mut self, id: NodeId) -> Result<Node, SceneError> {
        self.node(id)?;
        if let Some(parent) = self.parent(id) {
            self.unlink(parent, id);
        }

        let mut stack = vec![id];
        let mut root = None;
        while let Some(current) = stack.pop() {
            let (_, slot) = &mut self.slots[current.index as usize];
            if let Some(mut node) = slot.take() {
                stack.extend(node.children.drain(..));
                node.parent = None;
                self.free.push(current.index);
                self.len -= 1;
                if current == id {
                    root = Some(node);
                }
            }
        }
        root.ok_or(SceneError::InvalidNode(id))
    }

    /// `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the node, if `id` is live.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .and_then(|(slot_id, node)| {
                if *slot_id == id {
                    node.as_ref()
                } else {
                    None
                }
            })
    }

    /// Returns the node mutably, if `id` is live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .and_then(|(slot_id, node)| {
                if *slot_id == id {
                    node.as_mut()
                } else {
                    None
                }
            })
    }

    /// The number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.slots
            .iter()
            .filter_map(|(id, node)| node.as_ref().map(|n| (*id, n)))
    }

    /// The nodes without a parent, in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    // --- Hierarchy ---

    /// The parent of `id`, or `None` for roots and stale handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// The children of `id`; empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Moves `child` under `parent`, or makes it a root when `parent` is `None`.
    ///
    /// The child is removed from its previous parent's children and appended
    /// to the new parent's children exactly once. Reattaching to the current
    /// parent keeps the child's position among its siblings.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        self.node(child)?;
        if let Some(parent) = parent {
            self.node(parent)?;
            if parent == child {
                return Err(SceneError::SelfParent(child));
            }
            if self.ancestors(parent).any(|ancestor| ancestor == child) {
                return Err(SceneError::Cycle {
                    node: child,
                    parent,
                });
            }
        }

        let previous = self.parent(child);
        if previous == parent {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.unlink(previous, child);
        }
        if let Some(parent) = parent {
            if let Some(node) = self.get_mut(parent) {
                if !node.children.contains(&child) {
                    node.children.push(child);
                }
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Appends `child` to `parent`'s children. Same as
    /// `set_parent(child, Some(parent))`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.set_parent(child, Some(parent))
    }

    /// Detaches `child` from `parent`, making it a root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.set_parent(child, None)
    }

    /// Iterates the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    // --- Propagation ---

    /// Updates world matrices for `root` and its subtree, parents first.
    ///
    /// If `root` has a parent, that parent's current world matrix is used as
    /// the starting point. A node whose world matrix is recomputed forces
    /// all of its descendants to recompute theirs.
    pub fn update_matrix_world(&mut self, root: NodeId, force: bool) -> Result<(), SceneError> {
        self.node(root)?;
        let parent_world = self
            .parent(root)
            .and_then(|parent| self.get(parent))
            .map(|node| node.transform.world_matrix);

        let mut stack: Vec<(NodeId, Option<Mat4>, bool)> = vec![(root, parent_world, force)];
        while let Some((id, parent_world, force)) = stack.pop() {
            let Some(node) = self.get_mut(id) else {
                continue;
            };
            let force_children = node
                .transform
                .update_world_matrix(parent_world.as_ref(), force);
            let world = node.transform.world_matrix;
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(world), force_children)),
            );
        }
        Ok(())
    }

    /// Visits `root` and its subtree depth-first, parents before children
    /// and siblings in order. Returning [`Visit::SkipChildren`] prunes the
    /// subtree below the visited node.
    pub fn traverse<F>(&self, root: NodeId, mut visit: F) -> Result<(), SceneError>
    where
        F: FnMut(NodeId, &Node) -> Visit,
    {
        self.node(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if visit(id, node) == Visit::Continue {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(())
    }

    // --- Convenience ---

    /// The last computed world matrix of `id`.
    pub fn world_matrix(&self, id: NodeId) -> Option<&Mat4> {
        self.get(id).map(|node| &node.transform.world_matrix)
    }

    /// Rewrites the position, rotation and scale of `id` from its local matrix
    /// and returns `(rotation, position, scale)`.
    pub fn decompose(&mut self, id: NodeId) -> Result<(Quaternion, Vec3, Vec3), SceneError> {
        let transform = &mut self.node_mut(id)?.transform;
        transform.decompose();
        Ok((transform.quaternion, transform.position, transform.scale))
    }

    // --- Internals ---

    fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or_else(|| {
            log::warn!("Stale or unknown node handle {id}");
            SceneError::InvalidNode(id)
        })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        if !self.contains(id) {
            log::warn!("Stale or unknown node handle {id}");
            return Err(SceneError::InvalidNode(id));
        }
        self.get_mut(id).ok_or(SceneError::InvalidNode(id))
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_core::math::EPSILON;

    fn graph_with(n: usize) -> (SceneGraph, Vec<NodeId>) {
        let mut graph = SceneGraph::new();
        let ids = (0..n).map(|_| graph.insert(Node::new())).collect();
        (graph, ids)
    }

    // --- Storage ---

    #[test]
    fn test_insert_and_get() {
        let mut graph = SceneGraph::new();
        assert!(graph.is_empty());
        let id = graph.insert(Node::new().with_name("root"));
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(id));
        assert_eq!(graph.get(id).unwrap().name.as_deref(), Some("root"));
        assert_eq!(graph.roots(), vec![id]);
    }

    #[test]
    fn test_removed_slot_is_recycled_with_new_generation() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(Node::new());
        graph.remove(a).unwrap();
        let b = graph.insert(Node::new());

        assert_eq!(b.index, a.index);
        assert_eq!(b.generation, a.generation + 1);
        assert!(!graph.contains(a));
        assert!(graph.get(a).is_none());
        assert_eq!(graph.remove(a).unwrap_err(), SceneError::InvalidNode(a));
    }

    #[test]
    fn test_remove_drops_subtree_and_detaches() {
        let (mut graph, ids) = graph_with(4);
        let (root, a, b, c) = (ids[0], ids[1], ids[2], ids[3]);
        graph.add_child(root, a).unwrap();
        graph.add_child(a, b).unwrap();
        graph.add_child(root, c).unwrap();

        let removed = graph.remove(a).unwrap();

        assert!(removed.children().is_empty());
        assert!(removed.parent().is_none());
        assert!(!graph.contains(a));
        assert!(!graph.contains(b));
        assert_eq!(graph.children(root), &[c]);
        assert_eq!(graph.len(), 2);
    }

    // --- Hierarchy ---

    #[test]
    fn test_set_parent_links_both_sides() {
        let (mut graph, ids) = graph_with(2);
        let (a, b) = (ids[0], ids[1]);

        graph.set_parent(a, Some(b)).unwrap();
        graph.set_parent(a, Some(b)).unwrap();

        assert_eq!(graph.parent(a), Some(b));
        assert_eq!(graph.children(b), &[a]);
        assert_eq!(graph.roots(), vec![b]);
    }

    #[test]
    fn test_reparent_moves_between_parents() {
        let (mut graph, ids) = graph_with(3);
        let (child, first, second) = (ids[0], ids[1], ids[2]);

        graph.add_child(first, child).unwrap();
        graph.add_child(second, child).unwrap();

        assert!(graph.children(first).is_empty());
        assert_eq!(graph.children(second), &[child]);
        assert_eq!(graph.parent(child), Some(second));
    }

    #[test]
    fn test_reattach_to_same_parent_keeps_sibling_order() {
        let (mut graph, ids) = graph_with(3);
        let (parent, a, b) = (ids[0], ids[1], ids[2]);
        graph.add_child(parent, a).unwrap();
        graph.add_child(parent, b).unwrap();

        graph.add_child(parent, a).unwrap();

        assert_eq!(graph.children(parent), &[a, b]);
    }

    #[test]
    fn test_remove_child() {
        let (mut graph, ids) = graph_with(3);
        let (parent, child, stranger) = (ids[0], ids[1], ids[2]);
        graph.add_child(parent, child).unwrap();

        assert_eq!(
            graph.remove_child(parent, stranger),
            Err(SceneError::NotAChild {
                parent,
                child: stranger
            })
        );
        graph.remove_child(parent, child).unwrap();

        assert_eq!(graph.parent(child), None);
        assert!(graph.children(parent).is_empty());
    }

    #[test]
    fn test_cycles_are_rejected_and_graph_unchanged() {
        let (mut graph, ids) = graph_with(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        graph.add_child(a, b).unwrap();
        graph.add_child(b, c).unwrap();

        assert_eq!(
            graph.set_parent(a, Some(c)),
            Err(SceneError::Cycle { node: a, parent: c })
        );
        assert_eq!(graph.set_parent(a, Some(a)), Err(SceneError::SelfParent(a)));

        assert_eq!(graph.parent(a), None);
        assert_eq!(graph.children(c), &[] as &[NodeId]);
        assert_eq!(graph.ancestors(c).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_stale_handles_are_errors() {
        let (mut graph, ids) = graph_with(2);
        let stale = ids[1];
        graph.remove(stale).unwrap();
        assert_eq!(
            graph.set_parent(ids[0], Some(stale)),
            Err(SceneError::InvalidNode(stale))
        );
        assert_eq!(
            graph.update_matrix_world(stale, false),
            Err(SceneError::InvalidNode(stale))
        );
        assert!(graph.children(stale).is_empty());
    }

    // --- Propagation ---

    #[test]
    fn test_update_matrix_world_chains_parents() {
        // --- 1. ARRANGE ---
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::new().with_position(Vec3::new(10.0, 0.0, 0.0)));
        let child = graph.insert(Node::new().with_position(Vec3::new(0.0, 2.0, 0.0)));
        let grandchild = graph.insert(Node::new().with_position(Vec3::new(0.0, 0.0, 3.0)));
        graph.add_child(root, child).unwrap();
        graph.add_child(child, grandchild).unwrap();

        // --- 2. ACT ---
        graph.update_matrix_world(root, false).unwrap();

        // --- 3. ASSERT ---
        let world = graph.world_matrix(grandchild).unwrap();
        assert_relative_eq!(world.get_translation(), Vec3::new(10.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_update_from_inner_node_reads_parent_world() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::new().with_position(Vec3::new(1.0, 0.0, 0.0)));
        let child = graph.insert(Node::new().with_position(Vec3::new(0.0, 1.0, 0.0)));
        graph.add_child(root, child).unwrap();
        graph.update_matrix_world(root, false).unwrap();

        graph.get_mut(child).unwrap().transform.position = Vec3::new(0.0, 5.0, 0.0);
        graph.update_matrix_world(child, false).unwrap();

        let world = graph.world_matrix(child).unwrap();
        assert_relative_eq!(world.get_translation(), Vec3::new(1.0, 5.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_force_reaches_frozen_descendants() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::new());
        let child = graph.insert(Node::new().with_position(Vec3::new(0.0, 1.0, 0.0)));
        graph.add_child(root, child).unwrap();
        graph.update_matrix_world(root, false).unwrap();

        // Freeze both nodes, then move the root's matrix by hand.
        for id in [root, child] {
            graph.get_mut(id).unwrap().transform.matrix_auto_update = false;
        }
        let moved = Mat4::compose(&Quaternion::IDENTITY, Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);
        graph.get_mut(root).unwrap().transform.matrix = moved;

        graph.update_matrix_world(root, false).unwrap();
        assert_relative_eq!(
            graph.world_matrix(child).unwrap().get_translation(),
            Vec3::new(0.0, 1.0, 0.0),
            epsilon = EPSILON
        );

        graph.update_matrix_world(root, true).unwrap();
        assert_relative_eq!(
            graph.world_matrix(child).unwrap().get_translation(),
            Vec3::new(4.0, 1.0, 0.0),
            epsilon = EPSILON
        );
    }

    // --- Traversal ---

    #[test]
    fn test_traverse_is_preorder_and_prunes() {
        let (mut graph, ids) = graph_with(5);
        let (root, a, a1, b, b1) = (ids[0], ids[1], ids[2], ids[3], ids[4]);
        graph.add_child(root, a).unwrap();
        graph.add_child(a, a1).unwrap();
        graph.add_child(root, b).unwrap();
        graph.add_child(b, b1).unwrap();

        let mut order = Vec::new();
        graph
            .traverse(root, |id, _| {
                order.push(id);
                Visit::Continue
            })
            .unwrap();
        assert_eq!(order, vec![root, a, a1, b, b1]);

        let mut pruned = Vec::new();
        graph
            .traverse(root, |id, _| {
                pruned.push(id);
                if id == a {
                    Visit::SkipChildren
                } else {
                    Visit::Continue
                }
            })
            .unwrap();
        assert_eq!(pruned, vec![root, a, b, b1]);
    }

    #[test]
    fn test_decompose_forwarder() {
        let mut graph = SceneGraph::new();
        let id = graph.insert(Node::new());
        let m = Mat4::compose(&Quaternion::IDENTITY, Vec3::new(1.0, 2.0, 3.0), Vec3::ONE);
        graph.get_mut(id).unwrap().transform.matrix = m;

        let (_, position, scale) = graph.decompose(id).unwrap();

        assert_relative_eq!(position, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(scale, Vec3::ONE, epsilon = EPSILON);
        assert_eq!(graph.get(id).unwrap().transform.position, position);
    }
}
