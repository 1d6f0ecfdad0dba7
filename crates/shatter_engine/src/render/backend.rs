//! Graphics backend abstraction
//!
//! The narrow interface scene traversal and the particle renderer need from
//! the underlying graphics API. Window setup, camera and light marshaling and
//! texture decoding stay on the other side of this trait.

use crate::foundation::math::{Mat4, Point3, Vec2, Vec3};
use crate::scene::{Aabb, AttributeSet, BoundingSphere};

/// Borrowed triangle geometry ready for submission
#[derive(Debug, Clone, Copy)]
pub struct GeometryView<'a> {
    /// Vertex positions
    pub points: &'a [Point3],
    /// Per-vertex normals
    pub normals: &'a [Vec3],
    /// Per-vertex texture coordinates
    pub uvs: Option<&'a [Vec2]>,
    /// Triangle index triples
    pub triangles: &'a [[u32; 3]],
    /// Mesh attributes (surface shader, diffuse colour)
    pub attributes: &'a AttributeSet,
}

/// Back-face handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackfaceStyle {
    /// Cull back faces
    Remove,
    /// Draw both sides
    Both,
    /// Draw back faces with flipped normals
    Flip,
}

/// Illumination shader selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderBinding {
    /// The scene's regular lit shader
    Lit,
    /// Unlit / null illumination
    Null,
}

/// Outcome of a bounding pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsStatus<T> {
    /// Bounds are final
    Complete(T),
    /// The backend needs the geometry submitted again
    Retraverse,
}

/// Rendering backend consumed by traversal and particle rendering
pub trait GraphicsBackend {
    /// Current viewport size (width, height)
    fn viewport(&self) -> (u32, u32);

    /// Save renderer state
    fn push_state(&mut self);

    /// Restore the state saved by the matching `push_state`
    fn pop_state(&mut self);

    /// Set back-face handling until the next `pop_state`
    fn set_backface_style(&mut self, style: BackfaceStyle);

    /// Bind an illumination shader
    fn submit_shader(&mut self, shader: ShaderBinding);

    /// Set the model transform for subsequent geometry
    fn submit_transform(&mut self, transform: &Mat4);

    /// Reset the model transform to identity
    fn reset_transform(&mut self);

    /// Submit triangle geometry using the current transform
    fn submit_geometry(&mut self, geometry: GeometryView<'_>);

    /// Start accumulating an axis-aligned bounding box
    fn begin_bounding_box(&mut self);

    /// Finish the bounding box pass
    fn end_bounding_box(&mut self) -> BoundsStatus<Aabb>;

    /// Start accumulating a bounding sphere
    fn begin_bounding_sphere(&mut self);

    /// Finish the bounding sphere pass
    fn end_bounding_sphere(&mut self) -> BoundsStatus<BoundingSphere>;
}
