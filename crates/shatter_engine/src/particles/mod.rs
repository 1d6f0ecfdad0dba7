//! # Particle system
//!
//! Triangle-fragment particles produced by exploding scene meshes.
//!
//! ## Frame order
//!
//! ```text
//! explode()  ──► ParticlePool ◄── ParticleSimulator::step()
//!                     │
//!                     ▼
//!            ParticleRenderer::draw() ──► GraphicsBackend
//! ```
//!
//! The pool is passed explicitly to each stage, so explosion, simulation and
//! rendering cannot overlap within a frame.

pub mod explode;
pub mod ground;
pub mod particle;
pub mod pool;
pub mod renderer;
pub mod simulator;

pub use explode::{explode, ExplosionParams, ExplosionReport};
pub use ground::{FlatGround, GroundHeight, NoTerrain};
pub use particle::{Particle, ParticleMode};
pub use pool::{ParticlePool, MAX_PARTICLES};
pub use renderer::ParticleRenderer;
pub use simulator::{ParticleSimulator, SimulationReport};
