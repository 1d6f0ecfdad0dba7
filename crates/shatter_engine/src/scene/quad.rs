//! Textured quad builder
//!
//! Builds a flat, camera-facing rectangle `2 * aspect` wide and 2 high,
//! centred on the origin in the XY plane, preceded by its surface shader.
//! The shader node is the only reference to the shader; the mesh carries no
//! attribute set.

use crate::foundation::math::{Point3, Vec2, Vec3};

use super::bounds::BoundingSphere;
use super::error::SceneResult;
use super::mesh::TriMesh;
use super::node::{NodeHandle, SceneGraph, ShaderHandle};

/// Nodes created by [`textured_quad`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    /// Group holding `[shader node, mesh]`
    pub group: NodeHandle,
    /// The quad mesh
    pub mesh: NodeHandle,
    /// Sphere around the origin enclosing the quad's width or height
    pub bounding_sphere: BoundingSphere,
}

/// Add a textured quad using `shader` to the scene
pub fn textured_quad(scene: &mut SceneGraph, shader: ShaderHandle, aspect: f32) -> SceneResult<TexturedQuad> {
    let points = vec![
        Point3::new(-aspect, -1.0, 0.0),
        Point3::new(aspect, -1.0, 0.0),
        Point3::new(aspect, 1.0, 0.0),
        Point3::new(-aspect, 1.0, 0.0),
    ];
    let uvs = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let mesh = TriMesh::new(points, vec![Vec3::z(); 4], Some(uvs), vec![[0, 1, 2], [0, 2, 3]])?;

    let shader_node = scene.add_shader_node(shader)?;
    let mesh = scene.add_mesh(mesh);
    let group = scene.add_group(vec![shader_node, mesh])?;

    Ok(TexturedQuad {
        group,
        mesh,
        bounding_sphere: BoundingSphere::new(Vec3::zeros(), aspect.max(1.0)),
    })
}
