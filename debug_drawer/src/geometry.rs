//! Geometry factory: one immutable stamp mesh per primitive kind.

use std::collections::HashMap;
use std::sync::Arc;

use dbgdraw_core::mesh::{CpuMesh, generators};

use crate::render_context::RenderContext;

/// Shared, read-only handle to a stamp mesh.
///
/// Any number of live mesh instances may hold the same handle. Handles are
/// never pooled or reaped.
pub type MeshHandle = Arc<CpuMesh>;

const SPHERE_SEGMENTS: u32 = 24;
const SPHERE_RINGS: u32 = 16;

/// The stamps the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cube,
    WireCube,
    Sphere,
    WireSphere,
    Pyramid,
    WirePyramid,
    Disc,
    Tube,
    WireTube,
    WireHemisphere,
    Plane,
}

impl PrimitiveKind {
    /// Every kind.
    pub const ALL: [PrimitiveKind; 11] = [
        PrimitiveKind::Cube,
        PrimitiveKind::WireCube,
        PrimitiveKind::Sphere,
        PrimitiveKind::WireSphere,
        PrimitiveKind::Pyramid,
        PrimitiveKind::WirePyramid,
        PrimitiveKind::Disc,
        PrimitiveKind::Tube,
        PrimitiveKind::WireTube,
        PrimitiveKind::WireHemisphere,
        PrimitiveKind::Plane,
    ];

    /// Build the mesh for this kind. Pure and deterministic.
    pub fn generate(self) -> CpuMesh {
        match self {
            Self::Cube => generators::generate_cube(),
            Self::WireCube => generators::generate_wire_cube(),
            Self::Sphere => generators::generate_sphere(SPHERE_SEGMENTS, SPHERE_RINGS),
            Self::WireSphere => generators::generate_wire_sphere(),
            Self::Pyramid => generators::generate_pyramid(),
            Self::WirePyramid => generators::generate_wire_pyramid(),
            Self::Disc => generators::generate_disc(),
            Self::Tube => generators::generate_tube(),
            Self::WireTube => generators::generate_wire_tube(),
            Self::WireHemisphere => generators::generate_wire_hemisphere(),
            Self::Plane => generators::generate_plane(),
        }
    }
}

/// Memoizing mesh cache keyed by [`PrimitiveKind`].
#[derive(Debug, Default)]
pub struct GeometryFactory {
    meshes: HashMap<PrimitiveKind, MeshHandle>,
}

impl GeometryFactory {
    /// Create an empty factory. Meshes are built on first request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mesh for a kind, building it on the first call.
    pub fn mesh(&mut self, kind: PrimitiveKind) -> MeshHandle {
        self.meshes
            .entry(kind)
            .or_insert_with(|| {
                log::debug!("DebugDraw: building {:?} mesh", kind);
                Arc::new(kind.generate())
            })
            .clone()
    }

    /// Number of meshes built so far.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh has been built yet.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Release every cached mesh through the context and forget them.
    ///
    /// Handles still held elsewhere stay valid CPU data; only the factory's
    /// ownership and the context's GPU copies go away.
    pub fn release_all(&mut self, ctx: &mut dyn RenderContext) {
        for (_, mesh) in self.meshes.drain() {
            ctx.release_mesh(&mesh);
        }
    }
}
