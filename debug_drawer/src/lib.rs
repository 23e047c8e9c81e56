//! Immediate-mode debug drawing with timed requests.
//!
//! Application code calls drawing functions (lines, boxes, spheres, arcs,
//! capsules, coordinate frames) whenever it likes; each call becomes a draw
//! request that stays visible for a caller-chosen duration and is replayed
//! every frame until it expires.
//!
//! # Architecture
//!
//! - [`DebugDraw`] - owner of the lifecycle (gate, pools, clock, caches)
//! - [`RequestPool`] - live requests in three categories, with pooled vertex lists
//! - [`FrameClock`] and [`reap`] - pause-corrected frame clock and the reap pass
//! - [`replay`] - replays live requests through a [`RenderContext`]
//! - [`PipelineStateCache`] - the twelve debug materials, keyed by [`PipelineKey`]
//! - [`GeometryFactory`] - one shared stamp mesh per [`PrimitiveKind`]
//! - [`RecordingContext`] - CPU [`RenderContext`] that records draws as [`DebugVertex`] lists
//!
//! # Usage
//!
//! ```
//! use dbgdraw::{DebugDraw, DebugDrawConfig, DrawOptions, FrameTime, RecordingContext, ViewInfo};
//! use dbgdraw_core::math::{Quat, Vec3};
//!
//! let mut draw = DebugDraw::new(&DebugDrawConfig::development());
//! let mut ctx = RecordingContext::with_bundled_shaders();
//!
//! // Update phase, once per frame before any draw call:
//! draw.begin_frame(FrameTime::running(1.0 / 60.0));
//!
//! // Anywhere during the frame:
//! draw.line(Vec3::zeros(), Vec3::x(), [1.0, 0.0, 0.0, 1.0], DrawOptions::default());
//! draw.cube(Vec3::y(), Quat::identity(), Vec3::repeat(0.5), [0.0, 1.0, 0.0, 1.0], DrawOptions::timed(2.0));
//!
//! // Render phase, once per view:
//! let stats = draw.render(&ViewInfo::main_game(), &mut ctx);
//! assert_eq!(stats.line_segments, 1);
//! assert_eq!(stats.mesh_draws, 1);
//!
//! // Teardown:
//! draw.shutdown(&mut ctx);
//! ```

mod compositor;
mod config;
mod draw_api;
mod drawer;
mod error;
mod gate;
mod geometry;
mod global;
mod lifetime;
mod pipeline_state;
mod pool;
mod recorder;
mod render_context;
mod shader;
mod vertex;

pub use compositor::{ReplayStats, replay};
pub use config::{DEVELOPMENT_ENV_VAR, DebugDrawConfig, PoolConfig};
pub use draw_api::{ArcParams, DrawOptions, X_AXIS_COLOR, Y_AXIS_COLOR, Z_AXIS_COLOR};
pub use drawer::{DebugDraw, ViewInfo, ViewKind};
pub use error::DebugDrawError;
pub use gate::Gate;
pub use geometry::{GeometryFactory, MeshHandle, PrimitiveKind};
pub use global::{init_global, is_global_initialized, set_global_enabled, shutdown_global, with_global};
pub use lifetime::{FrameClock, FrameTime, ReapStats, reap};
pub use pipeline_state::{CullMode, DepthTest, PipelineKey, PipelineStateCache, Shading};
pub use pool::{
    LineBatch, LineSegment, MeshInstance, MeshInstanceBuilder, PoolStats, PrimitiveBatch, PrimitiveBatchBuilder,
    RequestPool,
};
pub use recorder::{RecordedCommand, RecordingContext};
pub use render_context::{BlendMode, Color, MaterialDescriptor, MaterialId, RenderContext, ShaderId, WHITE};
pub use shader::{
    COLORED_SHADER, COLORED_SHADER_SOURCE, FALLBACK_SHADER, SHADED_SHADER, SHADED_SHADER_SOURCE, bundled_shaders,
};
pub use vertex::{DebugUniforms, DebugVertex};
