//! Generic scene traversal
//!
//! [`SceneWalker`] performs a depth-first, pre-order walk, left to right
//! unless [`ChildOrder::LastToFirst`] is requested, using an explicit frontier stack instead of recursion. Every frontier
//! entry remembers the group depth it was queued at; before an entry is
//! visited the [`MatrixStack`] is unwound to that depth, which reproduces the
//! push-on-entry / pop-on-exit behaviour of a recursive walk.
//!
//! Behaviour is supplied through [`SceneVisitor`]. Groups are handled by the
//! walker itself and are never seen by the visitor.
//!
//! ```text
//! Group ─┬─ Transform   (work = work * T)
//!        ├─ Mesh        (visitor.on_mesh(mesh, work))
//!        └─ Group ─── Mesh  (inherits work, changes discarded on exit)
//! ```

use crate::core::config::TraversalLimits;
use crate::foundation::math::Mat4;

use super::error::{SceneError, SceneResult};
use super::matrix_stack::{accumulate, MatrixStack};
use super::mesh::TriMesh;
use super::node::{NodeArena, NodeHandle, SceneNode, ShaderHandle};

/// Per-variant traversal callbacks
pub trait SceneVisitor {
    /// A transform node was reached; returns the new working matrix
    fn on_transform(&mut self, _node: NodeHandle, local: &Mat4, work: &Mat4) -> Mat4 {
        accumulate(work, local)
    }

    /// A mesh node was reached
    fn on_mesh(&mut self, _node: NodeHandle, _mesh: &TriMesh, _work: &Mat4) -> SceneResult<()> {
        Ok(())
    }

    /// A shader node was reached
    fn on_shader(&mut self, _node: NodeHandle, _shader: ShaderHandle) -> SceneResult<()> {
        Ok(())
    }
}

/// Order in which a group's children are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildOrder {
    /// First child first
    #[default]
    FirstToLast,
    /// Children are stacked in order and popped from the top, so the last
    /// child is visited first
    LastToFirst,
}

/// Explicit-stack scene walker
pub struct SceneWalker<'a> {
    nodes: &'a NodeArena,
    limits: TraversalLimits,
    order: ChildOrder,
}

impl<'a> SceneWalker<'a> {
    /// Walker over `nodes` bounded by `limits`
    pub fn new(nodes: &'a NodeArena, limits: TraversalLimits) -> Self {
        Self {
            nodes,
            limits,
            order: ChildOrder::default(),
        }
    }

    /// Set the child visiting order
    pub fn with_order(mut self, order: ChildOrder) -> Self {
        self.order = order;
        self
    }

    /// Walk the subtree under `root` starting from the identity matrix
    pub fn walk<V: SceneVisitor + ?Sized>(&self, root: NodeHandle, visitor: &mut V) -> SceneResult<()> {
        self.walk_from(root, Mat4::identity(), visitor)
    }

    /// Walk the subtree under `root` starting from `root_matrix`
    pub fn walk_from<V: SceneVisitor + ?Sized>(
        &self,
        root: NodeHandle,
        root_matrix: Mat4,
        visitor: &mut V,
    ) -> SceneResult<()> {
        let mut matrices = MatrixStack::with_root(root_matrix);
        let mut frontier: Vec<(NodeHandle, usize)> = Vec::with_capacity(self.limits.max_frontier.min(64));
        frontier.push((root, 0));

        while let Some((handle, depth)) = frontier.pop() {
            matrices.unwind_to(depth);

            match self.nodes.get(handle)? {
                SceneNode::Transform(local) => {
                    let work = visitor.on_transform(handle, local, matrices.current());
                    matrices.set(work);
                }
                SceneNode::Mesh(mesh) => visitor.on_mesh(handle, mesh, matrices.current())?,
                SceneNode::Shader(shader) => visitor.on_shader(handle, *shader)?,
                SceneNode::Group(children) => {
                    if depth >= self.limits.max_depth {
                        return Err(SceneError::DepthExceeded {
                            max_depth: self.limits.max_depth,
                        });
                    }
                    if frontier.len() + children.len() > self.limits.max_frontier {
                        return Err(SceneError::FrontierOverflow {
                            capacity: self.limits.max_frontier,
                        });
                    }

                    matrices.push();
                    let queued = children.iter().map(|&child| (child, depth + 1));
                    match self.order {
                        // reversed so the first child is popped first
                        ChildOrder::FirstToLast => frontier.extend(queued.rev()),
                        ChildOrder::LastToFirst => frontier.extend(queued),
                    }
                }
                SceneNode::Other => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4Ext, Point3, Vec3};
    use crate::scene::node::SceneGraph;
    use crate::scene::test_support::unit_triangle;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        meshes: Vec<(NodeHandle, Mat4)>,
    }

    impl SceneVisitor for Recorder {
        fn on_mesh(&mut self, node: NodeHandle, _mesh: &TriMesh, work: &Mat4) -> SceneResult<()> {
            self.meshes.push((node, *work));
            Ok(())
        }
    }

    fn walk(scene: &SceneGraph, root: NodeHandle) -> SceneResult<Recorder> {
        let mut recorder = Recorder::default();
        SceneWalker::new(scene.nodes(), TraversalLimits::default()).walk(root, &mut recorder)?;
        Ok(recorder)
    }

    #[test]
    fn test_preorder_left_to_right() {
        let mut scene = SceneGraph::new();
        let m0 = scene.add_mesh(unit_triangle());
        let m1 = scene.add_mesh(unit_triangle());
        let m2 = scene.add_mesh(unit_triangle());
        let inner = scene.add_group(vec![m1]).unwrap();
        let root = scene.add_group(vec![m0, inner, m2]).unwrap();

        let order: Vec<_> = walk(&scene, root).unwrap().meshes.iter().map(|(h, _)| *h).collect();
        assert_eq!(order, vec![m0, m1, m2]);
    }

    #[test]
    fn test_last_to_first_order() {
        let mut scene = SceneGraph::new();
        let m0 = scene.add_mesh(unit_triangle());
        let m1 = scene.add_mesh(unit_triangle());
        let m2 = scene.add_mesh(unit_triangle());
        let inner = scene.add_group(vec![m1, m2]).unwrap();
        let root = scene.add_group(vec![m0, inner]).unwrap();

        let mut recorder = Recorder::default();
        SceneWalker::new(scene.nodes(), TraversalLimits::default())
            .with_order(ChildOrder::LastToFirst)
            .walk(root, &mut recorder)
            .unwrap();
        let order: Vec<_> = recorder.meshes.iter().map(|(h, _)| *h).collect();
        assert_eq!(order, vec![m2, m1, m0]);
    }

    #[test]
    fn test_transform_applies_to_later_siblings_only_within_group() {
        let mut scene = SceneGraph::new();
        let before = scene.add_mesh(unit_triangle());
        let shift = scene.add_transform(Mat4::translation(&Vec3::new(5.0, 0.0, 0.0)));
        let inside = scene.add_mesh(unit_triangle());
        let group = scene.add_group(vec![shift, inside]).unwrap();
        let after = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![before, group, after]).unwrap();

        let recorder = walk(&scene, root).unwrap();
        let origin = Point3::origin();
        let positions: Vec<_> = recorder.meshes.iter().map(|(_, m)| m.transform_point(&origin)).collect();

        assert_relative_eq!(positions[0], Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(positions[1], Point3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(positions[2], Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_nested_transforms_compose_root_to_leaf() {
        let mut scene = SceneGraph::new();
        let outer = scene.add_transform(Mat4::translation(&Vec3::new(0.0, 10.0, 0.0)));
        let inner = scene.add_transform(Mat4::uniform_scale(2.0));
        let mesh = scene.add_mesh(unit_triangle());
        let child = scene.add_group(vec![inner, mesh]).unwrap();
        let root = scene.add_group(vec![outer, child]).unwrap();

        let recorder = walk(&scene, root).unwrap();
        let p = recorder.meshes[0].1.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(2.0, 10.0, 0.0));
    }

    #[test]
    fn test_shared_child_visited_per_reference() {
        let mut scene = SceneGraph::new();
        let shared = scene.add_mesh(unit_triangle());
        let a = scene.add_group(vec![shared]).unwrap();
        let b = scene.add_group(vec![shared]).unwrap();
        let root = scene.add_group(vec![a, b]).unwrap();

        assert_eq!(walk(&scene, root).unwrap().meshes.len(), 2);
        // still owned by both parents afterwards
        assert_eq!(scene.children(a).unwrap(), &[shared]);
        assert_eq!(scene.children(b).unwrap(), &[shared]);
    }

    #[test]
    fn test_cycle_hits_depth_limit() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group(Vec::new()).unwrap();
        scene.add_child(group, group).unwrap();

        let err = walk(&scene, group).err();
        assert_eq!(err, Some(SceneError::DepthExceeded { max_depth: TraversalLimits::default().max_depth }));
    }

    #[test]
    fn test_frontier_overflow() {
        let mut scene = SceneGraph::new();
        let children: Vec<_> = (0..8).map(|_| scene.add_other()).collect();
        let root = scene.add_group(children).unwrap();

        let mut recorder = Recorder::default();
        let limits = TraversalLimits::default().with_frontier(4);
        let err = SceneWalker::new(scene.nodes(), limits).walk(root, &mut recorder).err();
        assert_eq!(err, Some(SceneError::FrontierOverflow { capacity: 4 }));
    }

    #[test]
    fn test_root_matrix_is_respected() {
        let mut scene = SceneGraph::new();
        let mesh = scene.add_mesh(unit_triangle());

        let mut recorder = Recorder::default();
        let root_matrix = Mat4::translation(&Vec3::new(0.0, 0.0, -3.0));
        SceneWalker::new(scene.nodes(), TraversalLimits::default())
            .walk_from(mesh, root_matrix, &mut recorder)
            .unwrap();
        assert_relative_eq!(recorder.meshes[0].1, root_matrix);
    }
}
