//! Lazily created process-wide [`DebugDraw`] instance.
//!
//! For hosts that want free-function style access instead of threading a
//! `DebugDraw` through their code. The instance is created with the default
//! configuration on first access, or explicitly with [`init_global`], and
//! torn down with [`shutdown_global`].

use parking_lot::Mutex;

use crate::config::DebugDrawConfig;
use crate::drawer::DebugDraw;
use crate::render_context::RenderContext;

static GLOBAL: Mutex<Option<DebugDraw>> = parking_lot::const_mutex(None);

/// Create the global instance from `config`.
///
/// Returns `false` and leaves the existing instance untouched if one was
/// already created.
pub fn init_global(config: &DebugDrawConfig) -> bool {
    let mut global = GLOBAL.lock();
    if global.is_some() {
        log::warn!("DebugDraw: global instance already initialized");
        return false;
    }
    *global = Some(DebugDraw::new(config));
    true
}

/// Run `f` with the global instance, creating it on first use.
///
/// The instance is locked for the duration of `f`; do not call back into
/// other `*_global` functions from inside it.
pub fn with_global<R>(f: impl FnOnce(&mut DebugDraw) -> R) -> R {
    let mut global = GLOBAL.lock();
    let draw = global.get_or_insert_with(|| DebugDraw::new(&DebugDrawConfig::default()));
    f(draw)
}

/// Flip the runtime enable switch of the global instance.
pub fn set_global_enabled(enabled: bool) {
    with_global(|draw| draw.set_enabled(enabled));
}

/// Whether the global instance exists.
pub fn is_global_initialized() -> bool {
    GLOBAL.lock().is_some()
}

/// Tear down the global instance. The next access creates a fresh one.
pub fn shutdown_global(ctx: &mut dyn RenderContext) {
    let taken = GLOBAL.lock().take();
    if let Some(mut draw) = taken {
        draw.shutdown(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_api::DrawOptions;
    use crate::drawer::ViewInfo;
    use crate::lifetime::FrameTime;
    use crate::recorder::RecordingContext;
    use dbgdraw_core::math::Vec3;

    // One test drives the whole lifecycle: the instance is process-wide state.
    #[test]
    fn test_global_lifecycle() {
        let mut ctx = RecordingContext::with_bundled_shaders();
        shutdown_global(&mut ctx);
        assert!(!is_global_initialized());

        assert!(init_global(&DebugDrawConfig::default().with_development(true)));
        assert!(!init_global(&DebugDrawConfig::default()));

        with_global(|draw| {
            draw.begin_frame(FrameTime::running(0.016));
            draw.line(Vec3::zeros(), Vec3::x(), [1.0; 4], DrawOptions::default());
        });
        let stats = with_global(|draw| draw.render(&ViewInfo::main_game(), &mut ctx));
        assert_eq!(stats.line_segments, 1);

        set_global_enabled(false);
        assert!(!with_global(|draw| draw.is_active()));

        shutdown_global(&mut ctx);
        assert!(!is_global_initialized());
        assert_eq!(ctx.material_count(), 0);

        // Lazily recreated on next access.
        assert!(with_global(|draw| draw.is_enabled()));
        assert!(is_global_initialized());
        shutdown_global(&mut ctx);
    }
}
