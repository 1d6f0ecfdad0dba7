//! Indexed triangle meshes
//!
//! A [`TriMesh`] owns its points, per-vertex normals (attribute slot 0,
//! mandatory), per-vertex UVs (attribute slot 1, optional) and triangle index
//! triples. Construction validates that attribute arrays match the point
//! count and that every triangle index is in range, so traversal code can
//! index freely afterwards.

use crate::foundation::math::{Point3, Vec2, Vec3};
use crate::render::GeometryView;

use super::error::{SceneError, SceneResult};
use super::node::ShaderHandle;

/// RGB colour, components in `[0, 1]`
pub type ColorRgb = Vec3;

/// Per-mesh attributes
///
/// An empty set (both fields `None`) is equivalent to a mesh without an
/// attribute set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeSet {
    /// Texture surface shader
    pub surface_shader: Option<ShaderHandle>,
    /// Flat diffuse colour
    pub diffuse_color: Option<ColorRgb>,
}

impl AttributeSet {
    /// Attribute set carrying only a surface shader
    pub fn with_surface_shader(shader: ShaderHandle) -> Self {
        Self {
            surface_shader: Some(shader),
            diffuse_color: None,
        }
    }

    /// Whether the set carries a surface shader attribute
    pub fn has_surface_shader(&self) -> bool {
        self.surface_shader.is_some()
    }

    /// Whether the set carries no attributes at all
    pub fn is_empty(&self) -> bool {
        self.surface_shader.is_none() && self.diffuse_color.is_none()
    }
}

/// Indexed triangle geometry
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    points: Vec<Point3>,
    normals: Vec<Vec3>,
    uvs: Option<Vec<Vec2>>,
    triangles: Vec<[u32; 3]>,
    attributes: AttributeSet,
}

impl TriMesh {
    /// Create a validated mesh
    pub fn new(
        points: Vec<Point3>,
        normals: Vec<Vec3>,
        uvs: Option<Vec<Vec2>>,
        triangles: Vec<[u32; 3]>,
    ) -> SceneResult<Self> {
        if normals.len() != points.len() {
            return Err(SceneError::AttributeLength {
                attribute: "normal",
                expected: points.len(),
                found: normals.len(),
            });
        }

        if let Some(uvs) = &uvs {
            if uvs.len() != points.len() {
                return Err(SceneError::AttributeLength {
                    attribute: "uv",
                    expected: points.len(),
                    found: uvs.len(),
                });
            }
        }

        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= points.len()) {
                return Err(SceneError::IndexOutOfRange {
                    triangle,
                    index,
                    points: points.len(),
                });
            }
        }

        Ok(Self {
            points,
            normals,
            uvs,
            triangles,
            attributes: AttributeSet::default(),
        })
    }

    /// Attach an attribute set
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    /// Point positions in object space
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Per-vertex normals
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Per-vertex texture coordinates
    pub fn uvs(&self) -> Option<&[Vec2]> {
        self.uvs.as_deref()
    }

    /// Triangle index triples
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of per-vertex attribute arrays: 1 (normals) or 2 (normals + UVs)
    pub fn vertex_attribute_count(&self) -> usize {
        if self.uvs.is_some() {
            2
        } else {
            1
        }
    }

    /// Mesh attribute set
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Mutable mesh attribute set
    pub fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    /// Borrowed view for backend submission
    pub fn view(&self) -> GeometryView<'_> {
        GeometryView {
            points: &self.points,
            normals: &self.normals,
            uvs: self.uvs(),
            triangles: &self.triangles,
            attributes: &self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle_points() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = TriMesh::new(
            unit_triangle_points(),
            vec![Vec3::z(); 3],
            Some(vec![Vec2::zeros(); 3]),
            vec![[0, 1, 2]],
        )
        .expect("valid mesh");

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_attribute_count(), 2);
        assert!(mesh.attributes().is_empty());
    }

    #[test]
    fn test_normals_only_mesh_has_one_attribute() {
        let mesh = TriMesh::new(unit_triangle_points(), vec![Vec3::z(); 3], None, vec![[0, 1, 2]])
            .expect("valid mesh");
        assert_eq!(mesh.vertex_attribute_count(), 1);
        assert!(mesh.uvs().is_none());
    }

    #[test]
    fn test_short_normals_rejected() {
        let err = TriMesh::new(unit_triangle_points(), vec![Vec3::z(); 2], None, vec![[0, 1, 2]])
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::AttributeLength { attribute: "normal", expected: 3, found: 2 }
        );
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let err = TriMesh::new(unit_triangle_points(), vec![Vec3::z(); 3], None, vec![[0, 1, 3]])
            .unwrap_err();
        assert_eq!(err, SceneError::IndexOutOfRange { triangle: 0, index: 3, points: 3 });
    }
}
