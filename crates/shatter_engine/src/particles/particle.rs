//! Exploded triangle fragments

use bitflags::bitflags;

use crate::foundation::math::{Mat4, Mat4Ext, Point3, Vec2, Vec3};
use crate::render::GeometryView;
use crate::scene::AttributeSet;

bitflags! {
    /// Per-particle behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParticleMode: u8 {
        /// Bounce off the ground instead of dying on contact
        const BOUNCE = 1 << 0;
        /// Extra upward kick at spawn
        const UPTHRUST = 1 << 1;
        /// Use the heavy gravity constant
        const HEAVYGRAVITY = 1 << 2;
        /// Draw unlit
        const NULLSHADER = 1 << 3;
    }
}

const TRIANGLE: [[u32; 3]; 1] = [[0, 1, 2]];

/// One exploded polygon fragment
///
/// Points are stored relative to the fragment's centroid so the fragment can
/// spin about its own centre; `position` holds the world-space centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Centroid-relative vertex positions
    pub points: [Point3; 3],
    /// World-space unit vertex normals
    pub normals: [Vec3; 3],
    /// Texture coordinates copied from the source mesh
    pub uvs: Option<[Vec2; 3]>,
    /// Attributes copied from the source mesh
    pub attributes: AttributeSet,
    /// World-space centroid
    pub position: Vec3,
    /// Euler angles (radians)
    pub rotation: Vec3,
    /// Angular velocity (radians/s per axis)
    pub rotation_velocity: Vec3,
    /// Uniform scale; the particle dies at 0
    pub scale: f32,
    /// Linear velocity (units/s)
    pub velocity: Vec3,
    /// Scale lost per second
    pub decay_speed: f32,
    /// Behaviour flags
    pub mode: ParticleMode,
    /// Whether the slot is in use
    pub alive: bool,
    /// Cached `T * R * S` model matrix
    pub transform: Mat4,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            points: [Point3::origin(); 3],
            normals: [Vec3::zeros(); 3],
            uvs: None,
            attributes: AttributeSet::default(),
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            rotation_velocity: Vec3::zeros(),
            scale: 1.0,
            velocity: Vec3::zeros(),
            decay_speed: 0.0,
            mode: ParticleMode::empty(),
            alive: false,
            transform: Mat4::identity(),
        }
    }
}

impl Particle {
    /// Recompute the model matrix from scale, rotation and position
    pub fn refresh_transform(&mut self) {
        self.transform = Mat4::scale_rotate_translate(self.scale, &self.rotation, &self.position);
    }

    /// Borrowed single-triangle geometry for submission
    pub fn geometry(&self) -> GeometryView<'_> {
        GeometryView {
            points: &self.points,
            normals: &self.normals,
            uvs: self.uvs.as_ref().map(|uvs| uvs.as_slice()),
            triangles: &TRIANGLE,
            attributes: &self.attributes,
        }
    }
}
