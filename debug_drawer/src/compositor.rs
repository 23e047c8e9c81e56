//! Frame compositor: replays every live request against a render context.
//!
//! Categories are replayed in a fixed order (mesh instances, primitive
//! batches, line buckets), each starting from white material tints. Within a
//! category entries are replayed in submission order and a material is only
//! rebound when the required state changes.

use crate::pipeline_state::PipelineStateCache;
use crate::pool::RequestPool;
use crate::render_context::{Color, MaterialId, RenderContext};
use dbgdraw_core::mesh::PrimitiveTopology;

/// What one replay pass issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Immediate mesh draws.
    pub mesh_draws: usize,
    /// Primitive batches emitted (empty batches are not counted).
    pub primitive_batches: usize,
    /// Line segments emitted across all buckets.
    pub line_segments: usize,
    /// Material binds issued.
    pub material_binds: usize,
    /// Entries skipped because their material could not be created.
    pub skipped: usize,
}

impl ReplayStats {
    /// Whether anything was drawn.
    pub fn is_empty(&self) -> bool {
        self.mesh_draws == 0 && self.primitive_batches == 0 && self.line_segments == 0
    }
}

/// Replay all live requests. Does not age them.
pub fn replay(pool: &RequestPool, cache: &PipelineStateCache, ctx: &mut dyn RenderContext) -> ReplayStats {
    let mut stats = ReplayStats::default();
    replay_mesh_instances(pool, cache, ctx, &mut stats);
    replay_primitive_batches(pool, cache, ctx, &mut stats);
    replay_line_batches(pool, cache, ctx, &mut stats);
    log::trace!(
        "DebugDraw: replayed {} meshes, {} batches, {} segments ({} binds, {} skipped)",
        stats.mesh_draws,
        stats.primitive_batches,
        stats.line_segments,
        stats.material_binds,
        stats.skipped
    );
    stats
}

fn replay_mesh_instances(
    pool: &RequestPool,
    cache: &PipelineStateCache,
    ctx: &mut dyn RenderContext,
    stats: &mut ReplayStats,
) {
    cache.reset_tints(ctx);
    let mut bound: Option<(MaterialId, Color)> = None;

    for instance in pool.mesh_instances() {
        let Some(material) = cache.material(instance.key) else {
            stats.skipped += 1;
            continue;
        };
        if bound != Some((material, instance.color)) {
            ctx.set_material_color(material, instance.color);
            ctx.bind_material(material);
            bound = Some((material, instance.color));
            stats.material_binds += 1;
        }
        ctx.draw_mesh_now(&instance.mesh, &instance.transform);
        stats.mesh_draws += 1;
    }
}

fn replay_primitive_batches(
    pool: &RequestPool,
    cache: &PipelineStateCache,
    ctx: &mut dyn RenderContext,
    stats: &mut ReplayStats,
) {
    cache.reset_tints(ctx);
    let mut bound: Option<MaterialId> = None;

    for batch in pool.primitive_batches() {
        if batch.vertices.is_empty() {
            continue;
        }
        let Some(material) = cache.material(batch.key) else {
            stats.skipped += 1;
            continue;
        };

        if let Some(transform) = &batch.transform {
            ctx.push_transform(transform);
        }
        if bound != Some(material) {
            ctx.bind_material(material);
            bound = Some(material);
            stats.material_binds += 1;
        }

        ctx.begin(batch.topology);
        for (i, vertex) in batch.vertices.iter().enumerate() {
            if batch.use_vertex_color || i == 0 {
                ctx.color(vertex.color);
            }
            ctx.vertex(vertex.position_vec());
        }
        ctx.end();

        if batch.transform.is_some() {
            ctx.pop_transform();
        }
        stats.primitive_batches += 1;
    }
}

fn replay_line_batches(
    pool: &RequestPool,
    cache: &PipelineStateCache,
    ctx: &mut dyn RenderContext,
    stats: &mut ReplayStats,
) {
    cache.reset_tints(ctx);

    for bucket in pool.line_batches() {
        if bucket.is_empty() {
            continue;
        }
        let Some(material) = cache.material(bucket.key()) else {
            stats.skipped += bucket.len();
            continue;
        };
        ctx.bind_material(material);
        stats.material_binds += 1;

        ctx.begin(PrimitiveTopology::LineList);
        for segment in bucket.segments() {
            ctx.color(segment.color);
            ctx.vertex(segment.a);
            ctx.vertex(segment.b);
        }
        ctx.end();
        stats.line_segments += bucket.len();
    }
}
