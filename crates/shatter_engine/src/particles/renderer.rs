//! Particle submission
//!
//! Particles are drawn double-sided inside a saved backend state. The unlit
//! shader is bound only when consecutive particles switch between
//! `NULLSHADER` and lit modes.

use crate::render::{BackfaceStyle, GraphicsBackend, ShaderBinding};

use super::particle::ParticleMode;
use super::pool::ParticlePool;

/// Draws live particles through a [`GraphicsBackend`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleRenderer;

impl ParticleRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Submit every live particle; returns the number drawn
    pub fn draw<B: GraphicsBackend + ?Sized>(&self, pool: &ParticlePool, backend: &mut B) -> usize {
        if pool.live_count() == 0 {
            return 0;
        }

        backend.push_state();
        backend.set_backface_style(BackfaceStyle::Both);

        let mut using_null = false;
        let mut drawn = 0;
        for particle in pool.iter_live() {
            let wants_null = particle.mode.contains(ParticleMode::NULLSHADER);
            if wants_null != using_null {
                backend.submit_shader(if wants_null { ShaderBinding::Null } else { ShaderBinding::Lit });
                using_null = wants_null;
            }

            backend.submit_transform(&particle.transform);
            backend.submit_geometry(particle.geometry());
            backend.reset_transform();
            drawn += 1;
        }

        backend.pop_state();
        if using_null {
            backend.submit_shader(ShaderBinding::Lit);
        }
        drawn
    }
}
