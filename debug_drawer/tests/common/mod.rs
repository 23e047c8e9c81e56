//! Shared frame-driving harness for the integration tests.

use dbgdraw::{DebugDraw, DebugDrawConfig, FrameTime, RecordedCommand, RecordingContext, ReplayStats, ViewInfo};

pub const WHITE: [f32; 4] = [1.0; 4];

/// Install a test logger once per test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A drawer plus a recording context, driven one frame at a time.
pub struct Harness {
    pub draw: DebugDraw,
    pub ctx: RecordingContext,
}

impl Harness {
    /// Development drawer with every bundled shader available.
    pub fn new() -> Self {
        Self::with_parts(
            DebugDrawConfig::default().with_development(true),
            RecordingContext::with_bundled_shaders(),
        )
    }

    pub fn with_parts(config: DebugDrawConfig, ctx: RecordingContext) -> Self {
        init_logger();
        Self {
            draw: DebugDraw::new(&config),
            ctx,
        }
    }

    /// Update-phase hook for a running frame.
    pub fn begin(&mut self, elapsed: f32) {
        self.draw.begin_frame(FrameTime::running(elapsed));
    }

    /// Render-phase hook for the main game view. Clears the command log first.
    pub fn render(&mut self) -> ReplayStats {
        self.ctx.take_commands();
        self.draw.render(&ViewInfo::main_game(), &mut self.ctx)
    }

    /// Vertex count of every primitive batch recorded by the last render.
    #[allow(dead_code)]
    pub fn primitive_sizes(&self) -> Vec<usize> {
        self.ctx
            .commands()
            .iter()
            .filter_map(|command| match command {
                RecordedCommand::Primitive { vertices, .. } => Some(vertices.len()),
                _ => None,
            })
            .collect()
    }
}
