//! Per-frame particle physics
//!
//! Each live particle spins, falls under gravity, moves, hits the ground and
//! shrinks. A particle dies when its scale reaches zero, or on ground
//! contact unless it bounces.

use crate::core::config::SimulationConfig;

use super::ground::GroundHeight;
use super::particle::{Particle, ParticleMode};
use super::pool::ParticlePool;

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationReport {
    /// Particles that decayed to zero scale
    pub expired: usize,
    /// Particles that died on ground contact
    pub grounded: usize,
}

enum Fate {
    Lives,
    Expired,
    Grounded,
}

/// Integrates particle motion
#[derive(Debug, Clone, Default)]
pub struct ParticleSimulator {
    config: SimulationConfig,
}

impl ParticleSimulator {
    /// Simulator with the given physics constants
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Physics constants in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advance every live particle by `dt` seconds
    pub fn step(&self, pool: &mut ParticlePool, dt: f32, ground: &dyn GroundHeight) -> SimulationReport {
        let mut report = SimulationReport::default();
        if pool.live_count() == 0 {
            return report;
        }

        for index in 0..pool.capacity() {
            let Some(particle) = pool.get_mut(index).filter(|p| p.alive) else {
                continue;
            };

            match self.advance(particle, dt, ground) {
                Fate::Lives => continue,
                Fate::Expired => report.expired += 1,
                Fate::Grounded => report.grounded += 1,
            }
            pool.release(index);
        }

        if report.expired + report.grounded > 0 {
            log::trace!(
                "Particles died: {} expired, {} grounded, {} live",
                report.expired,
                report.grounded,
                pool.live_count()
            );
        }
        report
    }

    fn advance(&self, particle: &mut Particle, dt: f32, ground: &dyn GroundHeight) -> Fate {
        particle.rotation += particle.rotation_velocity * dt;

        let gravity = if particle.mode.contains(ParticleMode::HEAVYGRAVITY) {
            self.config.heavy_gravity
        } else {
            self.config.gravity
        };
        particle.velocity.y -= gravity * dt;
        particle.position += particle.velocity * dt;

        let ground_y = ground
            .height_at(particle.position.x, particle.position.z)
            .unwrap_or(self.config.floor_height);
        if particle.position.y <= ground_y {
            if !particle.mode.contains(ParticleMode::BOUNCE) {
                return Fate::Grounded;
            }
            particle.position.y = ground_y;
            particle.velocity.y *= -self.config.bounce_restitution;
            particle.velocity.x *= self.config.bounce_friction;
            particle.velocity.z *= self.config.bounce_friction;
        }

        particle.scale -= particle.decay_speed * dt;
        if particle.scale <= 0.0 {
            return Fate::Expired;
        }

        particle.refresh_transform();
        Fate::Lives
    }
}
