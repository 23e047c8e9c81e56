use dbgdraw_core::math::Vec3;
use dbgdraw_core::mesh::PrimitiveTopology;

use crate::compositor::{self, ReplayStats};
use crate::config::DebugDrawConfig;
use crate::gate::Gate;
use crate::geometry::{GeometryFactory, MeshHandle, PrimitiveKind};
use crate::lifetime::{self, FrameClock, FrameTime, ReapStats};
use crate::pipeline_state::{PipelineKey, PipelineStateCache};
use crate::pool::{MeshInstanceBuilder, PoolStats, PrimitiveBatchBuilder, RequestPool};
use crate::render_context::{Color, RenderContext};

/// Kind of camera a render pass belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// An in-game camera.
    Game,
    /// The editor scene viewport.
    SceneView,
    /// Asset preview thumbnails and inspectors.
    Preview,
    /// Reflection probe captures.
    Reflection,
}

/// The render pass [`DebugDraw::render`] is called for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewInfo {
    pub kind: ViewKind,
    /// Whether this is the main game camera.
    pub main: bool,
}

impl ViewInfo {
    pub fn new(kind: ViewKind, main: bool) -> Self {
        Self { kind, main }
    }

    /// The main game camera.
    pub fn main_game() -> Self {
        Self::new(ViewKind::Game, true)
    }

    /// The editor scene viewport.
    pub fn scene_view() -> Self {
        Self::new(ViewKind::SceneView, false)
    }

    /// Whether debug draws are replayed into this view.
    pub fn is_eligible(&self) -> bool {
        match self.kind {
            ViewKind::Game => self.main,
            ViewKind::SceneView => true,
            ViewKind::Preview | ViewKind::Reflection => false,
        }
    }
}

/// Owner of the whole debug draw lifecycle.
///
/// Drive it with two hooks per frame, in this order:
/// - [`begin_frame`](Self::begin_frame) in the update phase, before any draw
///   call of the frame; ages and reaps live requests.
/// - [`render`](Self::render) in the render phase, once per view; replays
///   every live request.
///
/// Draw calls made between the two hooks are replayed in the same frame.
/// Call [`shutdown`](Self::shutdown) at teardown.
pub struct DebugDraw {
    gate: Gate,
    clock: FrameClock,
    elapsed: f32,
    pool: RequestPool,
    factory: GeometryFactory,
    cache: Option<PipelineStateCache>,
    last_reap: ReapStats,
    last_replay: ReplayStats,
}

impl DebugDraw {
    /// Create a drawer. The capability flag is fixed from `config` here.
    pub fn new(config: &DebugDrawConfig) -> Self {
        let gate = Gate::new(config.enabled, config.development);
        log::info!(
            "DebugDraw: created (enabled: {}, supported: {})",
            gate.is_enabled(),
            gate.is_supported()
        );
        Self {
            gate,
            clock: FrameClock::new(),
            elapsed: 0.0,
            pool: RequestPool::with_config(&config.pool),
            factory: GeometryFactory::new(),
            cache: None,
            last_reap: ReapStats::default(),
            last_replay: ReplayStats::default(),
        }
    }

    /// The enable switch and capability flag.
    pub fn gate(&self) -> Gate {
        self.gate
    }

    /// Whether draw calls currently do any work.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.gate.is_open()
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn is_supported(&self) -> bool {
        self.gate.is_supported()
    }

    /// Flip the runtime enable switch.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
    }

    /// Update-phase hook. Ages every live request by the corrected elapsed
    /// time and reaps the expired ones.
    pub fn begin_frame(&mut self, time: FrameTime) -> ReapStats {
        self.elapsed = self.clock.advance(time);
        self.last_reap = lifetime::reap(&mut self.pool, self.elapsed);
        self.last_reap
    }

    /// Render-phase hook. Replays every live request into `ctx` when the view
    /// is eligible and the gate is open.
    ///
    /// The pipeline state cache is built on the first call that needs it.
    pub fn render(&mut self, view: &ViewInfo, ctx: &mut dyn RenderContext) -> ReplayStats {
        if !self.gate.is_open() || !view.is_eligible() {
            return ReplayStats::default();
        }
        let cache = self.cache.get_or_insert_with(|| build_cache(ctx));
        self.last_replay = compositor::replay(&self.pool, cache, ctx);
        self.last_replay
    }

    /// Build the pipeline state cache for `ctx` if it does not exist yet.
    pub fn attach(&mut self, ctx: &mut dyn RenderContext) {
        if self.cache.is_none() {
            self.cache = Some(build_cache(ctx));
        }
    }

    /// Rebuild the pipeline state cache for a recreated context.
    ///
    /// Materials of the previous context are assumed gone with it and are
    /// not released.
    pub fn on_context_recreated(&mut self, ctx: &mut dyn RenderContext) {
        log::info!("DebugDraw: render context recreated");
        self.cache = Some(build_cache(ctx));
    }

    /// Teardown hook: release materials and stamp meshes, drop every live
    /// request and pooled buffer.
    pub fn shutdown(&mut self, ctx: &mut dyn RenderContext) {
        if let Some(mut cache) = self.cache.take() {
            cache.release(ctx);
        }
        self.factory.release_all(ctx);
        self.pool.clear();
        log::info!("DebugDraw: shut down");
    }

    /// Start a primitive batch, or `None` when the gate is closed.
    pub fn begin_primitive_batch(
        &mut self,
        topology: PrimitiveTopology,
        duration: f32,
        key: PipelineKey,
    ) -> Option<PrimitiveBatchBuilder<'_>> {
        if !self.gate.is_open() {
            return None;
        }
        Some(self.pool.begin_primitive_batch(topology, duration, key))
    }

    /// Start a mesh instance, or `None` when the gate is closed.
    pub fn begin_mesh_instance(&mut self, duration: f32, key: PipelineKey) -> Option<MeshInstanceBuilder<'_>> {
        if !self.gate.is_open() {
            return None;
        }
        Some(self.pool.begin_mesh_instance(duration, key))
    }

    /// Append a line segment to the bucket for `key`. No-op when the gate is
    /// closed.
    pub fn append_line(&mut self, key: PipelineKey, a: Vec3, b: Vec3, color: Color, duration: f32) {
        if self.gate.is_open() {
            self.pool.append_line_segment(key, a, b, color, duration);
        }
    }

    /// Start a mesh instance of a stamp kind, already carrying its mesh.
    pub(crate) fn begin_stamp(
        &mut self,
        kind: PrimitiveKind,
        duration: f32,
        key: PipelineKey,
    ) -> Option<MeshInstanceBuilder<'_>> {
        if !self.gate.is_open() {
            return None;
        }
        let mesh = self.factory.mesh(kind);
        let mut builder = self.pool.begin_mesh_instance(duration, key);
        builder.set_mesh(mesh);
        Some(builder)
    }

    /// Shared stamp mesh for a kind.
    pub fn mesh(&mut self, kind: PrimitiveKind) -> MeshHandle {
        self.factory.mesh(kind)
    }

    /// Live requests.
    pub fn pool(&self) -> &RequestPool {
        &self.pool
    }

    /// Pool counters.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Number of stamp meshes built so far.
    pub fn mesh_count(&self) -> usize {
        self.factory.len()
    }

    /// Corrected elapsed seconds of the last [`begin_frame`](Self::begin_frame).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn last_reap(&self) -> ReapStats {
        self.last_reap
    }

    pub fn last_replay(&self) -> ReplayStats {
        self.last_replay
    }

    /// The pipeline state cache, once built.
    pub fn pipeline_cache(&self) -> Option<&PipelineStateCache> {
        self.cache.as_ref()
    }
}

fn build_cache(ctx: &mut dyn RenderContext) -> PipelineStateCache {
    log::info!("DebugDraw: building pipeline state cache");
    PipelineStateCache::build(ctx)
}
