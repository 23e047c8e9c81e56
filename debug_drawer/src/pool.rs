//! Request pool: the three categories of live draw requests.
//!
//! - **Primitive batches**: immediate-mode vertex lists with an optional
//!   transform. Built through a [`PrimitiveBatchBuilder`]; their vertex lists
//!   come from, and return to, a [`FreeList`].
//! - **Mesh instances**: a shared stamp mesh drawn with a transform and a
//!   tint. Built through a [`MeshInstanceBuilder`].
//! - **Line batches**: six persistent buckets, one per (depth test, cull
//!   mode) pair, holding individually timed segments. Segments are appended
//!   directly and are live immediately.
//!
//! Builders are the "pending fill" state: nothing they hold is visible to the
//! reaper or the compositor until [`commit`](PrimitiveBatchBuilder::commit).

use dbgdraw_core::math::{Mat4, Vec3};
use dbgdraw_core::mesh::PrimitiveTopology;
use dbgdraw_core::pool::FreeList;

use crate::config::PoolConfig;
use crate::geometry::MeshHandle;
use crate::pipeline_state::PipelineKey;
use crate::render_context::{Color, WHITE};
use crate::vertex::DebugVertex;

/// A live immediate-mode primitive batch.
#[derive(Debug, Clone)]
pub struct PrimitiveBatch {
    pub topology: PrimitiveTopology,
    /// Vertices in the batch's local space.
    pub vertices: Vec<DebugVertex>,
    /// Transform pushed around the batch at replay, if any.
    pub transform: Option<Mat4>,
    /// When false, the first vertex color applies to the whole batch.
    pub use_vertex_color: bool,
    /// Seconds left to live.
    pub remaining: f64,
    pub key: PipelineKey,
}

/// A live stamp-mesh instance.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub mesh: MeshHandle,
    pub transform: Mat4,
    pub color: Color,
    pub remaining: f64,
    pub key: PipelineKey,
}

/// A single timed line segment inside a [`LineBatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub color: Color,
    pub remaining: f64,
}

/// A persistent bucket of line segments sharing one pipeline state.
#[derive(Debug, Clone)]
pub struct LineBatch {
    key: PipelineKey,
    segments: Vec<LineSegment>,
}

impl LineBatch {
    fn new(key: PipelineKey) -> Self {
        Self {
            key,
            segments: Vec::new(),
        }
    }

    /// The pipeline state every segment in this bucket is drawn with.
    pub fn key(&self) -> PipelineKey {
        self.key
    }

    /// Live segments in append order.
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn segments_mut(&mut self) -> &mut Vec<LineSegment> {
        &mut self.segments
    }
}

/// Counters describing the current pool contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Live primitive batches.
    pub primitive_batches: usize,
    /// Live mesh instances.
    pub mesh_instances: usize,
    /// Live line segments across all buckets.
    pub line_segments: usize,
    /// Vertex lists waiting for reuse.
    pub free_vertex_lists: usize,
    /// Vertex lists created since the pool was made.
    pub vertex_lists_created: usize,
    /// Requests started (batches, instances and segments) since the pool was made.
    pub allocations: usize,
}

impl PoolStats {
    /// Total number of live requests.
    pub fn live(&self) -> usize {
        self.primitive_batches + self.mesh_instances + self.line_segments
    }
}

/// Owner of every live draw request.
#[derive(Debug)]
pub struct RequestPool {
    pub(crate) primitive_batches: Vec<PrimitiveBatch>,
    pub(crate) mesh_instances: Vec<MeshInstance>,
    pub(crate) line_batches: [LineBatch; PipelineKey::BUCKET_COUNT],
    pub(crate) vertex_lists: FreeList<Vec<DebugVertex>>,
    allocations: usize,
}

impl Default for RequestPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestPool {
    /// Create an empty pool without reserved capacity.
    pub fn new() -> Self {
        Self {
            primitive_batches: Vec::new(),
            mesh_instances: Vec::new(),
            line_batches: std::array::from_fn(|i| LineBatch::new(PipelineKey::from_bucket_index(i))),
            vertex_lists: FreeList::new(),
            allocations: 0,
        }
    }

    /// Create a pool with capacity reserved per `config`.
    pub fn with_config(config: &PoolConfig) -> Self {
        let mut pool = Self::new();
        pool.primitive_batches.reserve(config.primitive_batches);
        pool.mesh_instances.reserve(config.mesh_instances);
        let capacity = config.vertex_list_capacity;
        pool.vertex_lists
            .prewarm_with(config.vertex_lists, || Vec::with_capacity(capacity));
        pool
    }

    /// Start a primitive batch. The batch is not live until committed.
    pub fn begin_primitive_batch(
        &mut self,
        topology: PrimitiveTopology,
        duration: f32,
        key: PipelineKey,
    ) -> PrimitiveBatchBuilder<'_> {
        self.allocations += 1;
        let vertices = self.vertex_lists.acquire();
        PrimitiveBatchBuilder {
            batch: Some(PrimitiveBatch {
                topology,
                vertices,
                transform: None,
                use_vertex_color: false,
                remaining: f64::from(duration),
                key,
            }),
            pool: self,
        }
    }

    /// Start a mesh instance. The instance is not live until committed.
    pub fn begin_mesh_instance(&mut self, duration: f32, key: PipelineKey) -> MeshInstanceBuilder<'_> {
        self.allocations += 1;
        MeshInstanceBuilder {
            pool: self,
            mesh: None,
            transform: Mat4::identity(),
            color: WHITE,
            remaining: f64::from(duration),
            key,
            committed: false,
        }
    }

    /// Append a segment to the bucket for `key`'s depth test and cull mode.
    /// The segment is live immediately.
    pub fn append_line_segment(&mut self, key: PipelineKey, a: Vec3, b: Vec3, color: Color, duration: f32) {
        self.allocations += 1;
        self.line_batches[key.bucket_index()].segments.push(LineSegment {
            a,
            b,
            color,
            remaining: f64::from(duration),
        });
    }

    /// Live primitive batches in submission order.
    pub fn primitive_batches(&self) -> &[PrimitiveBatch] {
        &self.primitive_batches
    }

    /// Live mesh instances in submission order.
    pub fn mesh_instances(&self) -> &[MeshInstance] {
        &self.mesh_instances
    }

    /// The six line buckets in replay order.
    pub fn line_batches(&self) -> &[LineBatch] {
        &self.line_batches
    }

    /// Current counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            primitive_batches: self.primitive_batches.len(),
            mesh_instances: self.mesh_instances.len(),
            line_segments: self.line_batches.iter().map(LineBatch::len).sum(),
            free_vertex_lists: self.vertex_lists.free_count(),
            vertex_lists_created: self.vertex_lists.created_count(),
            allocations: self.allocations,
        }
    }

    /// Drop every live request and every pooled buffer.
    pub fn clear(&mut self) {
        self.primitive_batches.clear();
        self.mesh_instances.clear();
        for batch in &mut self.line_batches {
            batch.segments.clear();
        }
        self.vertex_lists.clear();
    }
}

/// Pending primitive batch. Fill it, then [`commit`](Self::commit).
///
/// Dropping the builder without committing returns its vertex list to the
/// pool and nothing is drawn.
pub struct PrimitiveBatchBuilder<'a> {
    pool: &'a mut RequestPool,
    batch: Option<PrimitiveBatch>,
}

impl PrimitiveBatchBuilder<'_> {
    /// Push `transform` around the batch at replay.
    pub fn set_transform(&mut self, transform: Mat4) -> &mut Self {
        if let Some(batch) = &mut self.batch {
            batch.transform = Some(transform);
        }
        self
    }

    /// Emit every vertex with its own color instead of the first one.
    pub fn use_vertex_color(&mut self, enabled: bool) -> &mut Self {
        if let Some(batch) = &mut self.batch {
            batch.use_vertex_color = enabled;
        }
        self
    }

    /// Append a local-space vertex.
    pub fn add_vertex(&mut self, position: Vec3, color: Color) -> &mut Self {
        if let Some(batch) = &mut self.batch {
            batch.vertices.push(DebugVertex::new(position, color));
        }
        self
    }

    /// Number of vertices appended so far.
    pub fn vertex_count(&self) -> usize {
        self.batch.as_ref().map_or(0, |batch| batch.vertices.len())
    }

    /// Make the batch live.
    pub fn commit(mut self) {
        if let Some(batch) = self.batch.take() {
            self.pool.primitive_batches.push(batch);
        }
    }
}

impl Drop for PrimitiveBatchBuilder<'_> {
    fn drop(&mut self) {
        if let Some(batch) = self.batch.take() {
            log::trace!("DebugDraw: primitive batch dropped without commit");
            self.pool.vertex_lists.recycle(batch.vertices);
        }
    }
}

/// Pending mesh instance. Set its mesh, then [`commit`](Self::commit).
pub struct MeshInstanceBuilder<'a> {
    pool: &'a mut RequestPool,
    mesh: Option<MeshHandle>,
    transform: Mat4,
    color: Color,
    remaining: f64,
    key: PipelineKey,
    committed: bool,
}

impl MeshInstanceBuilder<'_> {
    pub fn set_mesh(&mut self, mesh: MeshHandle) -> &mut Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn set_transform(&mut self, transform: Mat4) -> &mut Self {
        self.transform = transform;
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Make the instance live. An instance without a mesh is discarded.
    pub fn commit(mut self) {
        self.committed = true;
        let Some(mesh) = self.mesh.take() else {
            log::warn!("DebugDraw: mesh instance committed without a mesh, discarded");
            return;
        };
        self.pool.mesh_instances.push(MeshInstance {
            mesh,
            transform: self.transform,
            color: self.color,
            remaining: self.remaining,
            key: self.key,
        });
    }
}

impl Drop for MeshInstanceBuilder<'_> {
    fn drop(&mut self) {
        if !self.committed {
            log::trace!("DebugDraw: mesh instance dropped without commit");
        }
    }
}
