//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the few fixed-function style matrix
//! helpers the overlay renderer needs.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Orthographic projection with the same argument order and clip-space
/// convention as a classic `glOrtho(left, right, bottom, top, near, far)`.
///
/// Passing `bottom > top` yields a Y-down screen space.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_orthographic(left, right, bottom, top, near, far)
}

/// Rotation about the +Z axis by `radians`
pub fn rotation_z(radians: f32) -> Mat4 {
    Mat4::from_axis_angle(&Vec3::z_axis(), radians)
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::new_translation(&offset)
}

/// Convert radians to degrees
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orthographic_maps_screen_corners_to_ndc() {
        let proj = orthographic(0.0, 640.0, 480.0, 0.0, 0.0, 1.0);

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-6);

        let bottom_right = proj * Vec4::new(640.0, 480.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let rot = rotation_z(std::f32::consts::FRAC_PI_2);
        let v = rot * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(radians_to_degrees(std::f32::consts::PI), 180.0, epsilon = 1e-4);
    }
}
