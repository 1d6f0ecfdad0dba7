//! Shader objects referenced by scene nodes and mesh attribute sets

use crate::foundation::math::Mat3;

/// Opaque texture identifier owned by the surrounding texture system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Shader category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Texture surface shader; carries a UV transform
    Surface,
    /// Lighting model shader (lit / null)
    Illumination,
    /// Anything else the backend understands
    Other,
}

/// A shared shader object
///
/// Shaders live in the scene's shader library and are referenced by handle,
/// so every shader node and mesh attribute pointing at the same handle sees
/// the same UV transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    /// Shader category
    pub kind: ShaderKind,
    /// Homogeneous 2D transform applied to texture coordinates
    pub uv_transform: Mat3,
    /// Bound texture, if any
    pub texture: Option<TextureId>,
}

impl Shader {
    /// Surface shader sampling `texture`
    pub fn surface(texture: TextureId) -> Self {
        Self {
            kind: ShaderKind::Surface,
            uv_transform: Mat3::identity(),
            texture: Some(texture),
        }
    }

    /// Shader of an arbitrary kind without a texture
    pub fn of_kind(kind: ShaderKind) -> Self {
        Self {
            kind,
            uv_transform: Mat3::identity(),
            texture: None,
        }
    }

    /// Whether UV scrolling applies to this shader
    pub fn is_surface(&self) -> bool {
        self.kind == ShaderKind::Surface
    }
}
