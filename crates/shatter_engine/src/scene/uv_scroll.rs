//! UV scrolling of surface shaders
//!
//! Every surface shader node and every mesh whose attribute set names a
//! surface shader counts as one occurrence, numbered from 1 in traversal
//! order across the whole call. The selector picks which occurrences get the
//! new UV transform.

use crate::core::config::TraversalLimits;
use crate::foundation::math::{Mat3, Mat3Ext, Mat4};

use super::error::SceneResult;
use super::mesh::TriMesh;
use super::node::{NodeHandle, SceneGraph, ShaderHandle, ShaderLibrary};
use super::traversal::{SceneVisitor, SceneWalker};

/// Which surface shader occurrences to scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderSelector {
    /// Every occurrence
    #[default]
    All,
    /// Only the Nth occurrence (1-based)
    Nth(u32),
}

impl ShaderSelector {
    /// Selector from a raw index where 0 means "all"
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Self::All,
            n => Self::Nth(n),
        }
    }

    fn matches(self, ordinal: u32) -> bool {
        match self {
            Self::All => true,
            Self::Nth(n) => n == ordinal,
        }
    }
}

/// Result of a UV scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UvScrollReport {
    /// Surface shader occurrences encountered
    pub matched: u32,
    /// Occurrences whose UV transform was replaced
    pub applied: u32,
}

struct UvScrollVisitor<'s> {
    shaders: &'s mut ShaderLibrary,
    transform: Mat3,
    selector: ShaderSelector,
    report: UvScrollReport,
}

impl UvScrollVisitor<'_> {
    fn occurrence(&mut self, shader: ShaderHandle) -> SceneResult<()> {
        self.report.matched += 1;
        if self.selector.matches(self.report.matched) {
            self.shaders.get_mut(shader)?.uv_transform = self.transform;
            self.report.applied += 1;
        }
        Ok(())
    }
}

impl SceneVisitor for UvScrollVisitor<'_> {
    // placement only matters for counting, so skip the matrix product
    fn on_transform(&mut self, _node: NodeHandle, _local: &Mat4, work: &Mat4) -> Mat4 {
        *work
    }

    fn on_mesh(&mut self, _node: NodeHandle, mesh: &TriMesh, _work: &Mat4) -> SceneResult<()> {
        match mesh.attributes().surface_shader {
            Some(shader) => self.occurrence(shader),
            None => Ok(()),
        }
    }

    fn on_shader(&mut self, _node: NodeHandle, shader: ShaderHandle) -> SceneResult<()> {
        if self.shaders.get(shader)?.is_surface() {
            self.occurrence(shader)?;
        }
        Ok(())
    }
}

/// Set the UV transform of selected surface shaders under `root` to a
/// translation by `(du, dv)`
pub fn scroll_uvs(
    scene: &mut SceneGraph,
    root: NodeHandle,
    du: f32,
    dv: f32,
    selector: ShaderSelector,
    limits: TraversalLimits,
) -> SceneResult<UvScrollReport> {
    let (nodes, shaders) = scene.split_mut();
    let mut visitor = UvScrollVisitor {
        shaders,
        transform: Mat3::uv_translation(du, dv),
        selector,
        report: UvScrollReport::default(),
    };
    SceneWalker::new(nodes, limits).walk(root, &mut visitor)?;

    if let ShaderSelector::Nth(n) = selector {
        if visitor.report.applied == 0 {
            log::debug!("UV scroll selector {} beyond {} surface shaders", n, visitor.report.matched);
        }
    }
    Ok(visitor.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::AttributeSet;
    use crate::scene::shader::{Shader, ShaderKind, TextureId};
    use crate::scene::test_support::unit_triangle;
    use approx::assert_relative_eq;

    struct Fixture {
        scene: SceneGraph,
        root: NodeHandle,
        shaders: Vec<ShaderHandle>,
    }

    // root: [surface node s0, mesh(s1), group[mesh(s2), lit node], mesh(no shader)]
    fn fixture() -> Fixture {
        let mut scene = SceneGraph::new();
        let shaders: Vec<_> = (0..3).map(|i| scene.add_shader(Shader::surface(TextureId(i)))).collect();
        let lit = scene.add_shader(Shader::of_kind(ShaderKind::Illumination));

        let s0 = scene.add_shader_node(shaders[0]).unwrap();
        let m1 = scene.add_mesh(unit_triangle().with_attributes(AttributeSet::with_surface_shader(shaders[1])));
        let m2 = scene.add_mesh(unit_triangle().with_attributes(AttributeSet::with_surface_shader(shaders[2])));
        let lit_node = scene.add_shader_node(lit).unwrap();
        let inner = scene.add_group(vec![m2, lit_node]).unwrap();
        let plain = scene.add_mesh(unit_triangle());
        let root = scene.add_group(vec![s0, m1, inner, plain]).unwrap();

        Fixture { scene, root, shaders }
    }

    fn offset(scene: &SceneGraph, shader: ShaderHandle) -> (f32, f32) {
        let m = scene.shader(shader).unwrap().uv_transform;
        (m[(0, 2)], m[(1, 2)])
    }

    #[test]
    fn test_selector_zero_scrolls_every_surface_shader() {
        let mut f = fixture();
        let selector = ShaderSelector::from_index(0);
        let report = scroll_uvs(&mut f.scene, f.root, 0.5, 0.25, selector, TraversalLimits::default()).unwrap();

        assert_eq!(report, UvScrollReport { matched: 3, applied: 3 });
        for &shader in &f.shaders {
            let (u, v) = offset(&f.scene, shader);
            assert_relative_eq!(u, 0.5);
            assert_relative_eq!(v, 0.25);
        }
    }

    #[test]
    fn test_selector_k_scrolls_only_kth_occurrence() {
        let mut f = fixture();
        let report = scroll_uvs(&mut f.scene, f.root, 1.0, 0.0, ShaderSelector::Nth(2), TraversalLimits::default())
            .unwrap();

        assert_eq!(report.applied, 1);
        assert!(report.matched >= 2);
        assert_eq!(offset(&f.scene, f.shaders[0]), (0.0, 0.0));
        assert_eq!(offset(&f.scene, f.shaders[1]), (1.0, 0.0));
        assert_eq!(offset(&f.scene, f.shaders[2]), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_replaces_previous_offset() {
        let mut f = fixture();
        let limits = TraversalLimits::default();
        scroll_uvs(&mut f.scene, f.root, 0.1, 0.1, ShaderSelector::All, limits).unwrap();
        scroll_uvs(&mut f.scene, f.root, 0.3, 0.0, ShaderSelector::All, limits).unwrap();

        let (u, v) = offset(&f.scene, f.shaders[2]);
        assert_relative_eq!(u, 0.3);
        assert_relative_eq!(v, 0.0);
    }

    #[test]
    fn test_selector_past_end_changes_nothing() {
        let mut f = fixture();
        let report = scroll_uvs(&mut f.scene, f.root, 1.0, 1.0, ShaderSelector::Nth(9), TraversalLimits::default())
            .unwrap();

        assert_eq!(report, UvScrollReport { matched: 3, applied: 0 });
        assert!(f.shaders.iter().all(|&s| offset(&f.scene, s) == (0.0, 0.0)));
    }
}
