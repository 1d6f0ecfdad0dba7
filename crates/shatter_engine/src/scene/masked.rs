//! Masked per-mesh callbacks
//!
//! Meshes are numbered from 0 in visiting order. A group's children are
//! stacked in order and popped from the top, so the last child of a group is
//! numbered first. Mesh N receives the callback when bit N of the mask is set. The walk uses a small fixed
//! frontier so an oversized graph fails fast instead of growing the stack.

use crate::core::config::TraversalLimits;
use crate::foundation::math::Mat4;

use super::error::SceneResult;
use super::mesh::TriMesh;
use super::node::{NodeHandle, SceneGraph, ShaderHandle, ShaderLibrary};
use super::traversal::{ChildOrder, SceneVisitor, SceneWalker};

/// Pending-node capacity of the masked walk
pub const FRONTIER_CAPACITY: usize = 64;

/// Mesh mask; bit N selects mesh N
pub type MeshMask = u64;

/// Result of a masked walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskedWalkReport {
    /// Meshes encountered
    pub meshes_found: usize,
    /// Callbacks invoked
    pub invoked: usize,
}

struct MaskVisitor<'s> {
    shaders: &'s ShaderLibrary,
    mask: MeshMask,
    meshes_found: usize,
    selected: Vec<NodeHandle>,
}

impl SceneVisitor for MaskVisitor<'_> {
    fn on_transform(&mut self, _node: NodeHandle, _local: &Mat4, work: &Mat4) -> Mat4 {
        *work
    }

    fn on_mesh(&mut self, node: NodeHandle, _mesh: &TriMesh, _work: &Mat4) -> SceneResult<()> {
        if self.mask & 1 != 0 {
            self.selected.push(node);
        }
        self.mask >>= 1;
        self.meshes_found += 1;
        Ok(())
    }

    fn on_shader(&mut self, node: NodeHandle, shader: ShaderHandle) -> SceneResult<()> {
        if self.shaders.get(shader)?.is_surface() {
            log::warn!("Masked walk: surface shader node {:?} not handled", node);
        }
        Ok(())
    }
}

/// Call `callback` on each mesh under `root` whose bit is set in `mask`
///
/// The graph is walked first and callbacks run afterwards in visiting order,
/// so the callback may freely mutate the mesh it is handed.
pub fn for_each_mesh<F>(
    scene: &mut SceneGraph,
    root: NodeHandle,
    mask: MeshMask,
    max_depth: usize,
    mut callback: F,
) -> SceneResult<MaskedWalkReport>
where
    F: FnMut(NodeHandle, &mut TriMesh),
{
    let limits = TraversalLimits::default()
        .with_frontier(FRONTIER_CAPACITY)
        .with_depth(max_depth);

    let mut visitor = MaskVisitor {
        shaders: scene.shaders(),
        mask,
        meshes_found: 0,
        selected: Vec::new(),
    };
    SceneWalker::new(scene.nodes(), limits)
        .with_order(ChildOrder::LastToFirst)
        .walk(root, &mut visitor)?;

    let MaskVisitor { meshes_found, selected, .. } = visitor;
    if meshes_found > MeshMask::BITS as usize {
        log::warn!(
            "Masked walk found {} meshes, only the first {} can be selected",
            meshes_found,
            MeshMask::BITS
        );
    }

    for &handle in &selected {
        callback(handle, scene.mesh_mut(handle)?);
    }

    Ok(MaskedWalkReport {
        meshes_found,
        invoked: selected.len(),
    })
}

/// Masked callback that strips the mesh's diffuse colour attribute
pub fn clear_diffuse_color(_node: NodeHandle, mesh: &mut TriMesh) {
    mesh.attributes_mut().diffuse_color = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::error::SceneError;
    use crate::scene::mesh::AttributeSet;
    use crate::scene::shader::{Shader, TextureId};
    use crate::scene::test_support::unit_triangle;

    const DEPTH: usize = 64;

    fn colored_triangle() -> TriMesh {
        unit_triangle().with_attributes(AttributeSet {
            surface_shader: None,
            diffuse_color: Some(Vec3::new(1.0, 0.0, 0.0)),
        })
    }

    #[test]
    fn test_mask_selects_by_traversal_ordinal() {
        let mut scene = SceneGraph::new();
        let m0 = scene.add_mesh(unit_triangle());
        let m1 = scene.add_mesh(unit_triangle());
        let m2 = scene.add_mesh(unit_triangle());
        let inner = scene.add_group(vec![m1, m2]).unwrap();
        let root = scene.add_group(vec![m0, inner]).unwrap();

        // visiting order is m2, m1, m0
        let mut visited = Vec::new();
        let report = for_each_mesh(&mut scene, root, 0b110, DEPTH, |handle, _| visited.push(handle)).unwrap();

        assert_eq!(visited, vec![m1, m0]);
        assert_eq!(report, MaskedWalkReport { meshes_found: 3, invoked: 2 });
    }

    #[test]
    fn test_bit_zero_selects_last_child() {
        let mut scene = SceneGraph::new();
        let m0 = scene.add_mesh(unit_triangle());
        let m1 = scene.add_mesh(unit_triangle());
        let m2 = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![m0, m1, m2]).unwrap();

        let mut visited = Vec::new();
        for_each_mesh(&mut scene, root, 0b001, DEPTH, |handle, _| visited.push(handle)).unwrap();
        assert_eq!(visited, vec![m2]);
    }

    #[test]
    fn test_clear_diffuse_color_on_selected_meshes() {
        let mut scene = SceneGraph::new();
        let m0 = scene.add_mesh(colored_triangle());
        let m1 = scene.add_mesh(colored_triangle());
        let root = scene.add_group(vec![m0, m1]).unwrap();

        // bit 1 is the second mesh visited, which is m0
        for_each_mesh(&mut scene, root, 0b10, DEPTH, clear_diffuse_color).unwrap();

        assert!(scene.mesh(m0).unwrap().attributes().diffuse_color.is_none());
        assert!(scene.mesh(m1).unwrap().attributes().diffuse_color.is_some());
    }

    #[test]
    fn test_meshes_past_mask_width_never_selected() {
        let mut scene = SceneGraph::new();
        let meshes: Vec<_> = (0..40).map(|_| scene.add_mesh(unit_triangle())).collect();
        let left = scene.add_group(meshes).unwrap();
        let more: Vec<_> = (0..30).map(|_| scene.add_mesh(unit_triangle())).collect();
        let right = scene.add_group(more).unwrap();
        let root = scene.add_group(vec![left, right]).unwrap();

        let report = for_each_mesh(&mut scene, root, MeshMask::MAX, DEPTH, |_, _| {}).unwrap();
        assert_eq!(report.meshes_found, 70);
        assert_eq!(report.invoked, 64);
    }

    #[test]
    fn test_broad_group_overflows_frontier() {
        let mut scene = SceneGraph::new();
        let meshes: Vec<_> = (0..FRONTIER_CAPACITY + 1).map(|_| scene.add_mesh(unit_triangle())).collect();
        let root = scene.add_group(meshes).unwrap();

        let mut calls = 0;
        let err = for_each_mesh(&mut scene, root, 1, DEPTH, |_, _| calls += 1);
        assert_eq!(err, Err(SceneError::FrontierOverflow { capacity: FRONTIER_CAPACITY }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_surface_shader_node_is_skipped() {
        let mut scene = SceneGraph::new();
        let shader = scene.add_shader(Shader::surface(TextureId(3)));
        let shader_node = scene.add_shader_node(shader).unwrap();
        let mesh = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![shader_node, mesh]).unwrap();

        let report = for_each_mesh(&mut scene, root, 1, DEPTH, |_, _| {}).unwrap();
        assert_eq!(report, MaskedWalkReport { meshes_found: 1, invoked: 1 });
    }
}
