//! The render-context seam.
//!
//! The debug drawer never talks to a GPU API directly. Everything it needs
//! from the host renderer goes through [`RenderContext`]: shader lookup,
//! material creation, immediate mesh draws and a GL-style immediate
//! primitive interface with a transform stack.
//!
//! [`RecordingContext`](crate::RecordingContext) is the CPU implementation
//! used by tests and by hosts that upload recorded vertices themselves.

use dbgdraw_core::math::{Mat4, Vec3};
use dbgdraw_core::mesh::{CpuMesh, PrimitiveTopology};

use crate::error::DebugDrawError;
use crate::pipeline_state::{CullMode, DepthTest};

/// Linear RGBA color.
pub type Color = [f32; 4];

/// Opaque white, the neutral material tint.
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Handle to a shader resolved by the render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Handle to a material created by the render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Blend mode of a debug material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Opaque, no blending.
    Opaque,
    /// Standard alpha blending (src alpha, one minus src alpha).
    #[default]
    AlphaBlend,
}

/// Descriptor for creating a debug material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialDescriptor {
    /// Shader the material renders with.
    pub shader: ShaderId,
    /// Face culling.
    pub cull_mode: CullMode,
    /// Whether fragments are tested against the depth buffer.
    pub depth_test: DepthTest,
    /// Whether fragments write depth. Debug materials never do.
    pub depth_write: bool,
    /// Color blending.
    pub blend: BlendMode,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MaterialDescriptor {
    /// Create a descriptor with debug defaults: no culling, depth test on,
    /// no depth writes, alpha blending.
    pub fn new(shader: ShaderId) -> Self {
        Self {
            shader,
            cull_mode: CullMode::Off,
            depth_test: DepthTest::On,
            depth_write: false,
            blend: BlendMode::AlphaBlend,
            label: None,
        }
    }

    /// Set face culling.
    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    /// Set the depth test.
    pub fn with_depth_test(mut self, depth_test: DepthTest) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Render-context collaborator driven by the compositor.
///
/// All calls happen on the thread that renders the frame, between the
/// host's render callback start and end.
pub trait RenderContext {
    /// Look up (and compile, if needed) a shader by name.
    fn find_shader(&mut self, name: &str) -> Option<ShaderId>;

    /// Create a material from a shader with the given fixed-function state.
    fn create_material(&mut self, descriptor: &MaterialDescriptor) -> Result<MaterialId, DebugDrawError>;

    /// Destroy a material created by [`create_material`](Self::create_material).
    fn release_material(&mut self, material: MaterialId);

    /// Set the tint color of a material. Takes effect at the next bind.
    fn set_material_color(&mut self, material: MaterialId, color: Color);

    /// Make a material current for the following draws.
    fn bind_material(&mut self, material: MaterialId);

    /// Draw a mesh immediately with the current material.
    fn draw_mesh_now(&mut self, mesh: &CpuMesh, transform: &Mat4);

    /// Forget any GPU-side copy of a mesh. Called once per mesh at teardown.
    fn release_mesh(&mut self, _mesh: &CpuMesh) {}

    /// Push a transform, multiplied onto the current top of the stack.
    fn push_transform(&mut self, transform: &Mat4);

    /// Pop the last pushed transform.
    fn pop_transform(&mut self);

    /// Begin an immediate primitive batch.
    fn begin(&mut self, topology: PrimitiveTopology);

    /// Set the color of the following vertices.
    fn color(&mut self, color: Color);

    /// Emit a vertex in the current transform's space.
    fn vertex(&mut self, position: Vec3);

    /// End the current primitive batch.
    fn end(&mut self);
}
