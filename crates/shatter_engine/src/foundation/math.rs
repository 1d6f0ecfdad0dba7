//! Math utilities and types
//!
//! Provides the vector and matrix types used by scene traversal and the
//! particle system.
//!
//! ## Conventions
//!
//! All matrices are column-major and act on column vectors (`M * p`), which is
//! nalgebra's native convention. A chain of local transforms `A` (outer) then
//! `B` (inner) therefore maps a point as `A * B * p`.

pub use nalgebra::{Matrix3, Matrix4, Rotation3, Vector2, Vector3, Vector4};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type (UV transforms)
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Extension trait for Mat4 with the builders used by traversal and particles
pub trait Mat4Ext {
    /// Uniform scale matrix
    fn uniform_scale(scale: f32) -> Mat4;

    /// Rotation from X, Y, Z Euler angles applied in that order
    ///
    /// X is applied first, Z last, so the matrix is `Rz * Ry * Rx`.
    fn rotation_xyz(angles: &Vec3) -> Mat4;

    /// Translation matrix
    fn translation(offset: &Vec3) -> Mat4;

    /// Scale, then rotate, then translate.
    fn scale_rotate_translate(scale: f32, angles: &Vec3, position: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn uniform_scale(scale: f32) -> Mat4 {
        Mat4::new_scaling(scale)
    }

    fn rotation_xyz(angles: &Vec3) -> Mat4 {
        // from_euler_angles(roll, pitch, yaw) == Rz(yaw) * Ry(pitch) * Rx(roll)
        Rotation3::from_euler_angles(angles.x, angles.y, angles.z).to_homogeneous()
    }

    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn scale_rotate_translate(scale: f32, angles: &Vec3, position: &Vec3) -> Mat4 {
        Self::translation(position) * Self::rotation_xyz(angles) * Self::uniform_scale(scale)
    }
}

/// Extension trait for 2D homogeneous UV matrices
pub trait Mat3Ext {
    /// 2D translation by `(du, dv)` in homogeneous form
    fn uv_translation(du: f32, dv: f32) -> Mat3;
}

impl Mat3Ext for Mat3 {
    fn uv_translation(du: f32, dv: f32) -> Mat3 {
        Mat3::new_translation(&Vec2::new(du, dv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_xyz_applies_x_first() {
        let angles = Vec3::new(constants::PI * 0.5, 0.0, constants::PI * 0.5);
        let m = Mat4::rotation_xyz(&angles);

        // +Y rotated 90deg about X becomes +Z, which a Z rotation leaves alone
        let p = m.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_scale_rotate_translate_order() {
        let position = Vec3::new(10.0, 0.0, 0.0);
        let angles = Vec3::new(0.0, 0.0, constants::PI * 0.5);
        let m = Mat4::scale_rotate_translate(2.0, &angles, &position);

        // (1,0,0) -> scaled (2,0,0) -> rotated about Z (0,2,0) -> translated (10,2,0)
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_uv_translation() {
        let m = Mat3::uv_translation(0.25, -0.5);
        let uv = m.transform_point(&nalgebra::Point2::new(0.5, 0.5));
        assert_relative_eq!(uv.x, 0.75);
        assert_relative_eq!(uv.y, 0.0);
    }
}
