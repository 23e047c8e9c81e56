use dbgdraw_core::math::{Mat4, Vec3, mat4_to_cols_array_2d};

use crate::render_context::Color;

/// A debug draw vertex: position + color.
///
/// Stored in primitive batches (local space) and emitted by the recording
/// backend (world space), ready for a vertex buffer upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl DebugVertex {
    /// Create a vertex from a position vector and a color.
    #[inline]
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }

    /// Position as a vector.
    #[inline]
    pub fn position_vec(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// Uniform buffer data for the debug draw shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugUniforms {
    /// Column-major 4x4 view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Material tint multiplied into every fragment.
    pub tint: [f32; 4],
}

impl DebugUniforms {
    pub fn new(view_proj: &Mat4, tint: Color) -> Self {
        Self {
            view_proj: mat4_to_cols_array_2d(view_proj),
            tint,
        }
    }
}
