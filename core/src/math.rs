//! Math type aliases and helper functions.
//!
//! All debug geometry is expressed in f32. Rotations are unit quaternions so
//! that stamp transforms never pick up accidental scale from the rotation.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Rotation quaternion (f32, unit length).
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// Build a 4x4 TRS matrix from translation, rotation and scale.
pub fn mat4_from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    let m = rotation.to_rotation_matrix();
    let rm = m.matrix();
    #[rustfmt::skip]
    let result = Mat4::new(
        rm[(0, 0)] * scale.x, rm[(0, 1)] * scale.y, rm[(0, 2)] * scale.z, translation.x,
        rm[(1, 0)] * scale.x, rm[(1, 1)] * scale.y, rm[(1, 2)] * scale.z, translation.y,
        rm[(2, 0)] * scale.x, rm[(2, 1)] * scale.y, rm[(2, 2)] * scale.z, translation.z,
        0.0,                  0.0,                  0.0,                  1.0,
    );
    result
}

/// Build a translation + rotation matrix with unit scale.
pub fn mat4_from_rotation_translation(rotation: Quat, translation: Vec3) -> Mat4 {
    mat4_from_scale_rotation_translation(Vec3::new(1.0, 1.0, 1.0), rotation, translation)
}

/// Transform a point (w = 1) by a 4x4 matrix.
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let v = m * Vec4::new(p.x, p.y, p.z, 1.0);
    Vec3::new(v.x, v.y, v.z)
}

/// Extract a column of the upper 3x3 part of a matrix.
pub fn mat4_axis(m: &Mat4, column: usize) -> Vec3 {
    Vec3::new(m[(0, column)], m[(1, column)], m[(2, column)])
}

/// Rotation of `angle_degrees` around `axis`.
///
/// A zero-length axis yields the identity rotation.
pub fn quat_from_axis_angle(axis: Vec3, angle_degrees: f32) -> Quat {
    match nalgebra::Unit::try_new(axis, f32::EPSILON) {
        Some(axis) => Quat::from_axis_angle(&axis, angle_degrees.to_radians()),
        None => Quat::identity(),
    }
}

/// Rotation that maps the local +Y axis onto `normal`.
///
/// Antiparallel normals resolve to a half turn around +X. Degenerate normals
/// resolve to the identity rotation.
pub fn rotation_from_up(normal: Vec3) -> Quat {
    let Some(n) = normal.try_normalize(f32::EPSILON) else {
        return Quat::identity();
    };
    Quat::rotation_between(&Vec3::y(), &n)
        .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::x_axis(), std::f32::consts::PI))
}

/// Angle in degrees between `from` and `to`, signed by the side of `axis`.
///
/// The result lies in `[-180, 180]`. Returns 0 when either vector is zero.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let denom = (from.norm_squared() * to.norm_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    let cos = (from.dot(&to) / denom).clamp(-1.0, 1.0);
    let unsigned = cos.acos().to_degrees();
    let sign = if axis.dot(&from.cross(&to)) < 0.0 {
        -1.0
    } else {
        1.0
    };
    unsigned * sign
}

/// Convert a 4x4 matrix to a column-major `[[f32; 4]; 4]` array.
pub fn mat4_to_cols_array_2d(m: &Mat4) -> [[f32; 4]; 4] {
    let s = m.as_slice();
    [
        [s[0], s[1], s[2], s[3]],
        [s[4], s[5], s[6], s[7]],
        [s[8], s[9], s[10], s[11]],
        [s[12], s[13], s[14], s[15]],
    ]
}
