//! Frame timing and the reap pass.
//!
//! [`FrameClock`] turns the host's raw frame time into the elapsed seconds
//! used for ageing. [`reap`] ages every live request by that amount and
//! removes the expired ones, keeping survivors in submission order.

use crate::pool::RequestPool;

/// Raw timing information handed in by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub elapsed: f32,
    /// Whether the host is paused this frame.
    pub paused: bool,
}

impl FrameTime {
    /// A running frame.
    pub fn running(elapsed: f32) -> Self {
        Self { elapsed, paused: false }
    }

    /// A paused frame.
    pub fn paused(elapsed: f32) -> Self {
        Self { elapsed, paused: true }
    }
}

/// Applies the pause correction to successive [`FrameTime`]s.
///
/// Elapsed time is zero while paused and on the first frame after a pause,
/// so the time jump accumulated during the pause never expires requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    was_paused: bool,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corrected elapsed seconds for this frame. Call once per frame.
    pub fn advance(&mut self, time: FrameTime) -> f32 {
        let resumed = self.was_paused && !time.paused;
        self.was_paused = time.paused;
        self.frame += 1;

        if time.paused || resumed {
            if resumed {
                log::trace!("DebugDraw: frame {} resumed from pause, elapsed clamped", self.frame);
            }
            return 0.0;
        }
        if !time.elapsed.is_finite() || time.elapsed < 0.0 {
            return 0.0;
        }
        time.elapsed
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Counts of requests removed by one reap pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReapStats {
    pub primitive_batches: usize,
    pub mesh_instances: usize,
    pub line_segments: usize,
}

impl ReapStats {
    pub fn total(&self) -> usize {
        self.primitive_batches + self.mesh_instances + self.line_segments
    }
}

/// Fraction of a frame step below which a remaining lifetime counts as spent.
/// Smaller remainders are rounding left over from `f32` decimal durations.
const EXPIRY_SLACK: f64 = 1e-3;

/// Subtract one frame step and report whether any lifetime is left.
#[inline]
fn age(remaining: &mut f64, step: f64) -> bool {
    *remaining -= step;
    *remaining > step * EXPIRY_SLACK
}

/// Age every live request by `elapsed` seconds and remove those with no
/// time left. Expired vertex lists are cleared and returned to the pool.
pub fn reap(pool: &mut RequestPool, elapsed: f32) -> ReapStats {
    let mut stats = ReapStats::default();
    let step = f64::from(elapsed);

    let free = &mut pool.vertex_lists;
    let before = pool.primitive_batches.len();
    pool.primitive_batches.retain_mut(|batch| {
        if age(&mut batch.remaining, step) {
            return true;
        }
        free.recycle(std::mem::take(&mut batch.vertices));
        false
    });
    stats.primitive_batches = before - pool.primitive_batches.len();

    let before = pool.mesh_instances.len();
    pool.mesh_instances.retain_mut(|instance| age(&mut instance.remaining, step));
    stats.mesh_instances = before - pool.mesh_instances.len();

    for bucket in &mut pool.line_batches {
        let segments = bucket.segments_mut();
        let before = segments.len();
        segments.retain_mut(|segment| age(&mut segment.remaining, step));
        stats.line_segments += before - segments.len();
    }

    if stats.total() > 0 {
        log::trace!(
            "DebugDraw: reaped {} batches, {} meshes, {} lines",
            stats.primitive_batches,
            stats.mesh_instances,
            stats.line_segments
        );
    }
    stats
}
