//! Scene graph model and traversals
//!
//! A [`SceneGraph`] is an arena of heterogeneous nodes (transforms, meshes,
//! groups, shader references) connected by non-owning handles. All
//! operations on it run through one explicit-stack walker.
//!
//! ## Architecture
//!
//! ```text
//! SceneGraph (arena + shader library)
//!      ↓
//! SceneWalker + MatrixStack
//!      ↓
//! SceneVisitor (bounds, radius, UV scroll, masked, explode)
//!      ↓
//! GraphicsBackend / ParticlePool
//! ```
//!
//! Operations:
//! - Bounding box / sphere and object radius ([`bounds`])
//! - UV scrolling of surface shaders ([`uv_scroll`])
//! - Surface shader replacement ([`texture`])
//! - Masked per-mesh callbacks ([`masked`])

pub mod bounds;
pub mod error;
pub mod masked;
pub mod matrix_stack;
pub mod mesh;
pub mod node;
pub mod quad;
pub mod shader;
pub mod texture;
pub mod traversal;
pub mod uv_scroll;

pub use bounds::{calc_bounding_box, calc_bounding_sphere, calc_object_radius, submit_scene, Aabb, BoundingSphere};
pub use error::{SceneError, SceneResult};
pub use masked::{clear_diffuse_color, for_each_mesh, MaskedWalkReport, MeshMask, FRONTIER_CAPACITY};
pub use matrix_stack::{accumulate, MatrixStack};
pub use mesh::{AttributeSet, ColorRgb, TriMesh};
pub use node::{NodeArena, NodeHandle, NodeKind, SceneGraph, SceneNode, ShaderHandle, ShaderLibrary};
pub use quad::{textured_quad, TexturedQuad};
pub use shader::{Shader, ShaderKind, TextureId};
pub use texture::replace_texture;
pub use traversal::{ChildOrder, SceneVisitor, SceneWalker};
pub use uv_scroll::{scroll_uvs, ShaderSelector, UvScrollReport};
