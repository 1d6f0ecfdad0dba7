//! # Shatter Engine
//!
//! Scene-graph traversal and triangle-shatter particles for retained-mode 3D
//! renderers.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena of transforms, meshes, groups and shader references
//! - **Traversal**: One explicit-stack walker with bounded depth and frontier
//! - **Bounds**: Backend bounding box / sphere passes and object radius
//! - **Shader Edits**: UV scrolling, surface shader replacement, masked callbacks
//! - **Particles**: Mesh explosion into a fixed pool, physics and submission
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shatter_engine::prelude::*;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::load_or_default("engine.toml")?;
//!     let mut scene = SceneGraph::new();
//!     let mesh = TriMesh::new(
//!         vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!         vec![Vec3::z(); 3],
//!         None,
//!         vec![[0, 1, 2]],
//!     )?;
//!     let root = scene.add_mesh(mesh);
//!
//!     let mut pool = ParticlePool::new();
//!     let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!     explode(&scene, root, &mut pool, &ExplosionParams::new(300.0, 0.5), config.traversal, &mut rng)?;
//!
//!     let simulator = ParticleSimulator::new(config.simulation);
//!     simulator.step(&mut pool, 1.0 / 60.0, &NoTerrain);
//!
//!     let mut backend = RecordingBackend::default();
//!     ParticleRenderer::new().draw(&pool, &mut backend);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod particles;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{EngineConfig, FrameConfig, SimulationConfig, TraversalLimits},
        foundation::{
            math::{Mat3, Mat4, Mat4Ext, Point3, Vec2, Vec3},
            time::FrameClock,
        },
        particles::{
            explode, ExplosionParams, GroundHeight, NoTerrain, ParticleMode, ParticlePool, ParticleRenderer,
            ParticleSimulator,
        },
        render::{GraphicsBackend, RecordingBackend},
        scene::{
            calc_bounding_box, calc_bounding_sphere, calc_object_radius, clear_diffuse_color, for_each_mesh,
            replace_texture, scroll_uvs, AttributeSet, NodeHandle, SceneError, SceneGraph, Shader, ShaderSelector,
            TriMesh,
        },
    };
}
