//! CPU render context that records what the compositor issues.
//!
//! [`RecordingContext`] resolves shaders from a registry, keeps a material
//! table with tints and a transform stack, and turns immediate-mode calls into
//! [`RecordedCommand`]s with world-space [`DebugVertex`]es. Hosts can upload
//! the recorded vertices with [`bytemuck::cast_slice`]; tests inspect them.

use std::collections::HashMap;

use dbgdraw_core::math::{Mat4, Vec3, transform_point};
use dbgdraw_core::mesh::{CpuMesh, PrimitiveTopology};

use crate::error::DebugDrawError;
use crate::render_context::{Color, MaterialDescriptor, MaterialId, RenderContext, ShaderId, WHITE};
use crate::shader::bundled_shaders;
use crate::vertex::DebugVertex;

/// One call sequence recorded by [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    /// A material was made current with the given tint.
    BindMaterial { material: MaterialId, tint: Color },
    /// A mesh was drawn immediately.
    DrawMesh {
        label: Option<String>,
        transform: Mat4,
        vertex_count: u32,
    },
    /// A `begin`..`end` primitive batch.
    Primitive {
        topology: PrimitiveTopology,
        vertices: Vec<DebugVertex>,
    },
}

#[derive(Debug, Clone)]
struct MaterialEntry {
    descriptor: MaterialDescriptor,
    tint: Color,
}

#[derive(Debug)]
struct OpenPrimitive {
    topology: PrimitiveTopology,
    vertices: Vec<DebugVertex>,
}

/// Recording implementation of [`RenderContext`].
#[derive(Debug)]
pub struct RecordingContext {
    shaders: HashMap<String, ShaderId>,
    materials: HashMap<MaterialId, MaterialEntry>,
    next_material: u32,
    transforms: Vec<Mat4>,
    color: Color,
    open: Option<OpenPrimitive>,
    commands: Vec<RecordedCommand>,
    released_meshes: usize,
    fail_material_creation: bool,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingContext {
    /// Create a context with no shaders registered.
    pub fn new() -> Self {
        Self {
            shaders: HashMap::new(),
            materials: HashMap::new(),
            next_material: 0,
            transforms: Vec::new(),
            color: WHITE,
            open: None,
            commands: Vec::new(),
            released_meshes: 0,
            fail_material_creation: false,
        }
    }

    /// Create a context with every bundled debug shader registered.
    pub fn with_bundled_shaders() -> Self {
        let mut ctx = Self::new();
        for (name, _) in bundled_shaders() {
            ctx.register_shader(name);
        }
        ctx
    }

    /// Make a shader resolvable by name. Registering twice returns the same id.
    pub fn register_shader(&mut self, name: &str) -> ShaderId {
        let next = ShaderId(self.shaders.len() as u32);
        *self.shaders.entry(name.to_string()).or_insert(next)
    }

    /// Make every following `create_material` call fail.
    pub fn set_fail_material_creation(&mut self, fail: bool) {
        self.fail_material_creation = fail;
    }

    /// Number of live materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Descriptor a live material was created from.
    pub fn material_descriptor(&self, material: MaterialId) -> Option<&MaterialDescriptor> {
        self.materials.get(&material).map(|entry| &entry.descriptor)
    }

    /// Current tint of a live material.
    pub fn material_color(&self, material: MaterialId) -> Option<Color> {
        self.materials.get(&material).map(|entry| entry.tint)
    }

    /// Number of `release_mesh` calls received.
    pub fn released_mesh_count(&self) -> usize {
        self.released_meshes
    }

    /// Depth of the transform stack.
    pub fn transform_depth(&self) -> usize {
        self.transforms.len()
    }

    /// Recorded commands, oldest first.
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<RecordedCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Every recorded primitive vertex, in emission order.
    pub fn primitive_vertices(&self) -> Vec<DebugVertex> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RecordedCommand::Primitive { vertices, .. } => Some(vertices.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Number of recorded mesh draws.
    pub fn mesh_draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, RecordedCommand::DrawMesh { .. }))
            .count()
    }

    fn current_transform(&self) -> Mat4 {
        self.transforms.last().copied().unwrap_or_else(Mat4::identity)
    }
}

impl RenderContext for RecordingContext {
    fn find_shader(&mut self, name: &str) -> Option<ShaderId> {
        self.shaders.get(name).copied()
    }

    fn create_material(&mut self, descriptor: &MaterialDescriptor) -> Result<MaterialId, DebugDrawError> {
        if self.fail_material_creation {
            return Err(DebugDrawError::MaterialCreation(format!(
                "material creation disabled ({})",
                descriptor.label.as_deref().unwrap_or("unnamed")
            )));
        }
        let id = MaterialId(self.next_material);
        self.next_material += 1;
        self.materials.insert(
            id,
            MaterialEntry {
                descriptor: descriptor.clone(),
                tint: WHITE,
            },
        );
        Ok(id)
    }

    fn release_material(&mut self, material: MaterialId) {
        self.materials.remove(&material);
    }

    fn set_material_color(&mut self, material: MaterialId, color: Color) {
        if let Some(entry) = self.materials.get_mut(&material) {
            entry.tint = color;
        }
    }

    fn bind_material(&mut self, material: MaterialId) {
        let tint = self.material_color(material).unwrap_or(WHITE);
        self.commands.push(RecordedCommand::BindMaterial { material, tint });
    }

    fn draw_mesh_now(&mut self, mesh: &CpuMesh, transform: &Mat4) {
        self.commands.push(RecordedCommand::DrawMesh {
            label: mesh.label().map(str::to_string),
            transform: *transform,
            vertex_count: mesh.vertex_count(),
        });
    }

    fn release_mesh(&mut self, _mesh: &CpuMesh) {
        self.released_meshes += 1;
    }

    fn push_transform(&mut self, transform: &Mat4) {
        let top = self.current_transform() * transform;
        self.transforms.push(top);
    }

    fn pop_transform(&mut self) {
        if self.transforms.pop().is_none() {
            log::warn!("RecordingContext: pop_transform on an empty stack");
        }
    }

    fn begin(&mut self, topology: PrimitiveTopology) {
        if self.open.is_some() {
            log::warn!("RecordingContext: begin while a primitive is open, previous batch dropped");
        }
        self.open = Some(OpenPrimitive {
            topology,
            vertices: Vec::new(),
        });
    }

    fn color(&mut self, color: Color) {
        self.color = color;
    }

    fn vertex(&mut self, position: Vec3) {
        let world = transform_point(&self.current_transform(), position);
        let color = self.color;
        match &mut self.open {
            Some(open) => open.vertices.push(DebugVertex::new(world, color)),
            None => log::warn!("RecordingContext: vertex outside begin/end"),
        }
    }

    fn end(&mut self) {
        if let Some(open) = self.open.take() {
            self.commands.push(RecordedCommand::Primitive {
                topology: open.topology,
                vertices: open.vertices,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{COLORED_SHADER, SHADED_SHADER};

    #[test]
    fn test_bundled_shaders_resolve() {
        let mut ctx = RecordingContext::with_bundled_shaders();
        assert!(ctx.find_shader(COLORED_SHADER).is_some());
        assert!(ctx.find_shader(SHADED_SHADER).is_some());
        assert!(ctx.find_shader("missing").is_none());
    }

    #[test]
    fn test_register_shader_is_idempotent() {
        let mut ctx = RecordingContext::new();
        let a = ctx.register_shader("a");
        let b = ctx.register_shader("b");
        assert_ne!(a, b);
        assert_eq!(ctx.register_shader("a"), a);
    }

    #[test]
    fn test_transform_stack_composes() {
        let mut ctx = RecordingContext::new();
        ctx.push_transform(&Mat4::new_translation(&Vec3::x()));
        ctx.push_transform(&Mat4::new_scaling(2.0));
        ctx.begin(PrimitiveTopology::PointList);
        ctx.vertex(Vec3::new(1.0, 1.0, 1.0));
        ctx.end();
        ctx.pop_transform();
        ctx.pop_transform();

        assert_eq!(ctx.primitive_vertices()[0].position, [3.0, 2.0, 2.0]);
        assert_eq!(ctx.transform_depth(), 0);
    }

    #[test]
    fn test_failing_material_creation() {
        let mut ctx = RecordingContext::with_bundled_shaders();
        ctx.set_fail_material_creation(true);
        let shader = ctx.register_shader(COLORED_SHADER);
        let result = ctx.create_material(&MaterialDescriptor::new(shader));
        assert!(matches!(result, Err(DebugDrawError::MaterialCreation(_))));
    }

    #[test]
    fn test_vertex_bytes_for_upload() {
        let mut ctx = RecordingContext::new();
        ctx.begin(PrimitiveTopology::LineList);
        ctx.color([0.0, 1.0, 0.0, 1.0]);
        ctx.vertex(Vec3::zeros());
        ctx.vertex(Vec3::y());
        ctx.end();

        let vertices = ctx.primitive_vertices();
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<DebugVertex>());
        assert_eq!(vertices[1].color, [0.0, 1.0, 0.0, 1.0]);
    }
}
