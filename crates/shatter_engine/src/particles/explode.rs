//! Mesh-to-particle explosion
//!
//! Walks a subtree with the scene walker and turns every `density`-th
//! triangle of each mesh into a free-flying particle positioned in world
//! space. The source meshes are only read.

use rand::Rng;

use crate::core::config::TraversalLimits;
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::scene::{NodeHandle, SceneError, SceneGraph, SceneResult, SceneVisitor, SceneWalker, TriMesh};

use super::particle::ParticleMode;
use super::pool::ParticlePool;

/// Explosion tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    /// Scale of the random initial velocity
    pub boom_force: f32,
    /// Flags given to every spawned particle
    pub mode: ParticleMode,
    /// Triangle stride; 1 explodes every triangle, 2 every other one
    pub density: usize,
    /// Scale lost per second
    pub decay_speed: f32,
}

impl ExplosionParams {
    /// Params exploding every triangle with no mode flags
    pub fn new(boom_force: f32, decay_speed: f32) -> Self {
        Self {
            boom_force,
            mode: ParticleMode::empty(),
            density: 1,
            decay_speed,
        }
    }

    /// Set the particle mode flags
    pub fn with_mode(mut self, mode: ParticleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the triangle stride
    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }
}

/// Result of an explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExplosionReport {
    /// Particles spawned
    pub spawned: usize,
    /// Selected triangles lost to a full pool
    pub dropped: usize,
}

struct ExplodeVisitor<'p, 'r, R: Rng + ?Sized> {
    pool: &'p mut ParticlePool,
    params: ExplosionParams,
    rng: &'r mut R,
    report: ExplosionReport,
}

impl<R: Rng + ?Sized> ExplodeVisitor<'_, '_, R> {
    fn spread(&mut self) -> f32 {
        self.rng.gen_range(-0.5..0.5)
    }

    fn random_velocity(&mut self) -> Vec3 {
        let boom = self.params.boom_force;
        let mut velocity = Vec3::new(self.spread() * boom, self.spread() * boom, self.spread() * boom);
        if self.params.mode.contains(ParticleMode::UPTHRUST) {
            velocity.y += 1.5 * boom;
        }
        velocity
    }

    fn random_spin(&mut self) -> Vec3 {
        Vec3::new(self.spread() * 4.0, self.spread() * 4.0, self.spread() * 4.0)
    }
}

impl<R: Rng + ?Sized> SceneVisitor for ExplodeVisitor<'_, '_, R> {
    fn on_mesh(&mut self, _node: NodeHandle, mesh: &TriMesh, work: &Mat4) -> SceneResult<()> {
        let selected = mesh.triangles().iter().step_by(self.params.density);
        let total = selected.len();

        for (n, triangle) in selected.enumerate() {
            let world = triangle.map(|i| work.transform_point(&mesh.points()[i as usize]));
            let normals = fetch_normals(mesh.normals(), triangle)?;
            let uvs = mesh.uvs().map(|uvs| triangle.map(|i| uvs[i as usize]));
            let velocity = self.random_velocity();
            let rotation_velocity = self.random_spin();

            let Some(particle) = self.pool.claim() else {
                self.report.dropped += total - n;
                log::trace!("Particle pool full, dropping {} triangles", total - n);
                return Ok(());
            };

            let centroid = (world[0].coords + world[1].coords + world[2].coords) / 3.0;
            particle.points = world.map(|p| Point3::from(p.coords - centroid));
            particle.normals = normals.map(|normal| {
                work.transform_vector(&normal)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vec3::zeros)
            });
            particle.uvs = uvs;
            particle.attributes = *mesh.attributes();
            particle.position = centroid;
            particle.velocity = velocity;
            particle.rotation_velocity = rotation_velocity;
            particle.decay_speed = self.params.decay_speed;
            particle.mode = self.params.mode;
            particle.refresh_transform();
            self.report.spawned += 1;
        }
        Ok(())
    }
}

fn fetch_normals(normals: &[Vec3], triangle: &[u32; 3]) -> SceneResult<[Vec3; 3]> {
    let mut out = [Vec3::zeros(); 3];
    for (slot, &index) in out.iter_mut().zip(triangle) {
        *slot = *normals
            .get(index as usize)
            .ok_or(SceneError::MissingVertexNormals { index })?;
    }
    Ok(out)
}

/// Explode every mesh under `root` into particles
///
/// Spawning stops quietly once the pool is full; the report says how many
/// triangles were lost.
pub fn explode<R: Rng + ?Sized>(
    scene: &SceneGraph,
    root: NodeHandle,
    pool: &mut ParticlePool,
    params: &ExplosionParams,
    limits: TraversalLimits,
    rng: &mut R,
) -> SceneResult<ExplosionReport> {
    if params.density == 0 {
        return Err(SceneError::InvalidDensity);
    }

    let mut visitor = ExplodeVisitor {
        pool,
        params: *params,
        rng,
        report: ExplosionReport::default(),
    };
    SceneWalker::new(scene.nodes(), limits).walk(root, &mut visitor)?;

    let report = visitor.report;
    log::debug!(
        "Explosion spawned {} particles ({} dropped)",
        report.spawned,
        report.dropped
    );
    Ok(report)
}
