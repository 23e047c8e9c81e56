//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`CpuMesh`] - Immutable CPU-side stamp mesh (positions, normals, indices)

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Vertices form a connected strip of lines.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Vertices form a connected strip of triangles.
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Get the number of vertices per primitive (for non-strip topologies).
    pub fn vertices_per_primitive(&self) -> Option<u32> {
        match self {
            Self::PointList => Some(1),
            Self::LineList => Some(2),
            Self::TriangleList => Some(3),
            Self::LineStrip | Self::TriangleStrip => None, // Variable
        }
    }

    /// Number of primitives assembled from `vertex_count` vertices.
    pub fn primitive_count(&self, vertex_count: u32) -> u32 {
        match self {
            Self::PointList => vertex_count,
            Self::LineList => vertex_count / 2,
            Self::TriangleList => vertex_count / 3,
            Self::LineStrip => vertex_count.saturating_sub(1),
            Self::TriangleStrip => vertex_count.saturating_sub(2),
        }
    }

    /// Whether primitives of this topology are lines.
    pub fn is_lines(&self) -> bool {
        matches!(self, Self::LineList | Self::LineStrip)
    }
}

/// CPU-side mesh holding positions, normals and u32 indices.
///
/// Built once by a generator and never mutated afterwards. Normals are empty
/// for line meshes.
#[derive(Clone, PartialEq)]
pub struct CpuMesh {
    topology: PrimitiveTopology,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    label: Option<String>,
}

impl CpuMesh {
    /// Create an empty mesh with the given topology.
    pub fn new(topology: PrimitiveTopology) -> Self {
        Self {
            topology,
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            label: None,
        }
    }

    /// Set the vertex positions.
    pub fn with_positions(mut self, positions: Vec<[f32; 3]>) -> Self {
        self.positions = positions;
        self
    }

    /// Set per-vertex normals. Must match the position count.
    pub fn with_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        debug_assert_eq!(normals.len(), self.positions.len());
        self.normals = normals;
        self
    }

    /// Set the index list.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Index every vertex in order (`0, 1, 2, ...`).
    pub fn with_sequential_indices(mut self) -> Self {
        self.indices = (0..self.positions.len() as u32).collect();
        self
    }

    /// Compute normals by averaging the face normals of every triangle that
    /// references a vertex.
    ///
    /// Only meaningful for [`PrimitiveTopology::TriangleList`]; other
    /// topologies are left without normals.
    pub fn with_recalculated_normals(mut self) -> Self {
        if self.topology != PrimitiveTopology::TriangleList {
            log::warn!("CpuMesh: normal recalculation skipped for {:?} topology", self.topology);
            return self;
        }

        let mut sums = vec![[0.0f32; 3]; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.positions[i as usize]);
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            for &i in tri {
                let s = &mut sums[i as usize];
                s[0] += n[0];
                s[1] += n[1];
                s[2] += n[2];
            }
        }

        for n in &mut sums {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if len > f32::EPSILON {
                n[0] /= len;
                n[1] /= len;
                n[2] /= len;
            }
        }

        self.normals = sums;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Get the vertex positions.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Get the vertex normals (empty for line meshes).
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Get the index list.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw position bytes, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw index bytes (u32), ready for an index buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of primitives drawn from this mesh.
    pub fn primitive_count(&self) -> u32 {
        let count = if self.is_indexed() {
            self.index_count()
        } else {
            self.vertex_count()
        };
        self.topology.primitive_count(count)
    }

    /// Get the mesh label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for CpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuMesh")
            .field("label", &self.label)
            .field("topology", &self.topology)
            .field("vertex_count", &self.vertex_count())
            .field("index_count", &self.index_count())
            .finish()
    }
}
