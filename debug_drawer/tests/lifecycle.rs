//! Frame-level lifecycle tests: ageing, reaping, replay order, pooling and
//! gating, driven through the public API and the recording context.

mod common;

use rstest::rstest;

use common::{Harness, WHITE};
use dbgdraw::{
    ArcParams, COLORED_SHADER, DebugDrawConfig, DrawOptions, FrameTime, PipelineKey, PipelineStateCache,
    RecordedCommand, RecordingContext, RequestPool, ViewInfo, ViewKind, reap, replay,
};
use dbgdraw_core::math::{Mat4, Quat, Vec3};
use dbgdraw_core::mesh::PrimitiveTopology;

#[derive(Debug, Clone, Copy)]
enum Category {
    Line,
    Batch,
    Mesh,
}

fn submit(harness: &mut Harness, category: Category, options: DrawOptions) {
    let draw = &mut harness.draw;
    match category {
        Category::Line => draw.line(Vec3::zeros(), Vec3::x(), WHITE, options),
        Category::Batch => draw.ray(Vec3::zeros(), Vec3::y(), WHITE, options),
        Category::Mesh => draw.wire_cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, options),
    }
}

fn replayed(stats: &dbgdraw::ReplayStats, category: Category) -> usize {
    match category {
        Category::Line => stats.line_segments,
        Category::Batch => stats.primitive_batches,
        Category::Mesh => stats.mesh_draws,
    }
}

// ---------------------------------------------------------------------------
// Lifetime
// ---------------------------------------------------------------------------

#[rstest]
#[case::single_frame(0.0, 0.25, 1)]
#[case::exact_one_step(0.25, 0.25, 1)]
#[case::two_steps(0.5, 0.25, 2)]
#[case::partial_step(0.6, 0.25, 3)]
#[case::many_steps(1.0, 0.125, 8)]
#[case::shorter_than_step(0.1, 0.5, 1)]
#[case::decimal_tenths(0.3, 0.1, 3)]
#[case::decimal_half(0.5, 0.1, 5)]
#[case::one_second_at_60hz(1.0, 1.0 / 60.0, 60)]
fn test_entry_replayed_ceil_lifetime_over_elapsed_frames(
    #[case] lifetime: f32,
    #[case] elapsed: f32,
    #[case] expected: usize,
    #[values(Category::Line, Category::Batch, Category::Mesh)] category: Category,
) {
    let mut harness = Harness::new();

    harness.begin(elapsed);
    submit(&mut harness, category, DrawOptions::timed(lifetime));

    let mut frames = 0;
    for frame in 0..expected + 5 {
        if frame > 0 {
            harness.begin(elapsed);
        }
        let count = replayed(&harness.render(), category);
        if count > 0 {
            assert_eq!(frame, frames, "replays must be consecutive");
            frames += 1;
        }
    }
    assert_eq!(frames, expected);
}

#[test]
fn test_expiring_entry_is_not_replayed_in_its_last_frame() {
    let mut harness = Harness::new();
    harness.begin(0.5);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::timed(0.5));
    assert_eq!(harness.render().line_segments, 1);

    // This frame's decrement brings the lifetime to zero: reaped before replay.
    let reaped = harness.draw.begin_frame(FrameTime::running(0.5));
    assert_eq!(reaped.line_segments, 1);
    assert!(harness.render().is_empty());
}

#[test]
fn test_single_line_end_to_end() {
    let mut harness = Harness::new();
    harness.begin(1.0 / 60.0);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());

    let stats = harness.render();
    assert_eq!(stats.line_segments, 1);
    let vertices = harness.ctx.primitive_vertices();
    assert_eq!(vertices.len(), 2);
    assert_eq!(vertices[0].position, [0.0, 0.0, 0.0]);
    assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);

    harness.begin(1.0 / 60.0);
    assert!(harness.render().is_empty());
    assert!(harness.ctx.commands().is_empty());
}

#[test]
fn test_pause_spike_does_not_expire_entries() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::timed(1.0));

    harness.begin(0.1);
    for _ in 0..3 {
        harness.draw.begin_frame(FrameTime::paused(0.1));
    }
    // Wall-clock time accumulated while paused arrives as one spike.
    harness.draw.begin_frame(FrameTime::running(60.0));
    assert_eq!(harness.draw.elapsed(), 0.0);
    assert_eq!(harness.render().line_segments, 1);

    // Normal ageing resumes afterwards: 0.9 s were left.
    let mut frames = 0;
    while harness.render().line_segments > 0 {
        harness.begin(0.1);
        frames += 1;
        assert!(frames < 20);
    }
    assert!((8..=10).contains(&frames), "{frames}");
}

#[test]
fn test_render_without_begin_frame_does_not_age() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::timed(0.15));
    for _ in 0..5 {
        assert_eq!(harness.render().line_segments, 1);
    }
    harness.begin(0.1);
    harness.begin(0.1);
    assert!(harness.render().is_empty());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn test_same_key_batches_replay_in_submission_order() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.ray(Vec3::zeros(), Vec3::x(), [1.0, 0.0, 0.0, 1.0], DrawOptions::timed(0.35));
    harness.draw.ray(Vec3::zeros(), Vec3::y(), [0.0, 0.0, 1.0, 1.0], DrawOptions::timed(1.0));
    harness.draw.ray(Vec3::zeros(), Vec3::z(), [0.0, 1.0, 0.0, 1.0], DrawOptions::timed(1.0));

    for frame in 0..6 {
        if frame > 0 {
            harness.begin(0.1);
        }
        harness.render();
        let ends: Vec<[f32; 3]> = harness
            .ctx
            .primitive_vertices()
            .iter()
            .skip(1)
            .step_by(2)
            .map(|v| v.position)
            .collect();
        let expected: Vec<[f32; 3]> = if frame < 4 {
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        } else {
            vec![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        };
        assert_eq!(ends, expected, "frame {frame}");
    }
}

#[test]
fn test_same_key_meshes_replay_in_submission_order() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    for (x, lifetime) in [(1.0, 0.35), (2.0, 1.0), (3.0, 1.0)] {
        harness.draw.wire_cube(
            Vec3::new(x, 0.0, 0.0),
            Quat::identity(),
            Vec3::repeat(1.0),
            WHITE,
            DrawOptions::timed(lifetime),
        );
    }

    for frame in 0..6 {
        if frame > 0 {
            harness.begin(0.1);
        }
        harness.render();
        let xs: Vec<f32> = harness
            .ctx
            .commands()
            .iter()
            .filter_map(|command| match command {
                RecordedCommand::DrawMesh { transform, .. } => Some(transform[(0, 3)]),
                _ => None,
            })
            .collect();
        let expected = if frame < 4 { vec![1.0, 2.0, 3.0] } else { vec![2.0, 3.0] };
        assert_eq!(xs, expected, "frame {frame}");
    }
}

#[test]
fn test_line_bucket_keeps_order_after_reaping_earlier_segment() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::timed(0.35));
    harness.draw.line(Vec3::zeros(), Vec3::y(), WHITE, DrawOptions::timed(1.0));
    harness.draw.line(Vec3::zeros(), Vec3::z(), WHITE, DrawOptions::timed(1.0));

    for frame in 0..6 {
        if frame > 0 {
            harness.begin(0.1);
        }
        if frame == 4 {
            harness.draw.line(Vec3::zeros(), Vec3::repeat(1.0), WHITE, DrawOptions::timed(1.0));
        }
        harness.render();
        let ends: Vec<[f32; 3]> = harness
            .ctx
            .primitive_vertices()
            .iter()
            .skip(1)
            .step_by(2)
            .map(|v| v.position)
            .collect();
        let expected: Vec<[f32; 3]> = if frame < 4 {
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        } else {
            vec![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0]]
        };
        assert_eq!(ends, expected, "frame {frame}");
    }
}

#[test]
fn test_categories_replay_meshes_then_batches_then_lines() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    harness.draw.ray(Vec3::zeros(), Vec3::y(), WHITE, DrawOptions::default());
    harness.draw.cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, DrawOptions::default());
    harness.render();

    let kinds: Vec<&str> = harness
        .ctx
        .commands()
        .iter()
        .filter_map(|command| match command {
            RecordedCommand::DrawMesh { .. } => Some("mesh"),
            RecordedCommand::Primitive { topology, vertices } => {
                assert_eq!(*topology, PrimitiveTopology::LineList);
                Some(if vertices[1].position[1] == 1.0 { "batch" } else { "line" })
            }
            RecordedCommand::BindMaterial { .. } => None,
        })
        .collect();
    assert_eq!(kinds, vec!["mesh", "batch", "line"]);
}

// ---------------------------------------------------------------------------
// Pooling
// ---------------------------------------------------------------------------

#[test]
fn test_reaped_buffer_is_reused_empty() {
    let config = DebugDrawConfig {
        pool: dbgdraw::PoolConfig {
            vertex_lists: 0,
            ..Default::default()
        },
        ..DebugDrawConfig::default().with_development(true)
    };
    let mut harness = Harness::with_parts(config, RecordingContext::with_bundled_shaders());

    harness.begin(0.1);
    harness.draw.arc(
        Vec3::zeros(),
        Quat::identity(),
        ArcParams::sector(Vec3::x(), 90.0, 1.0),
        WHITE,
        DrawOptions::default(),
    );
    harness.render();
    assert_eq!(harness.draw.stats().vertex_lists_created, 1);

    harness.begin(0.1);
    assert_eq!(harness.draw.stats().free_vertex_lists, 1);

    let builder = harness
        .draw
        .begin_primitive_batch(PrimitiveTopology::LineList, 0.0, PipelineKey::default())
        .unwrap();
    assert_eq!(builder.vertex_count(), 0);
    builder.commit();
    assert_eq!(harness.draw.stats().vertex_lists_created, 1);
    assert!(harness.draw.pool().primitive_batches()[0].vertices.capacity() >= 50);
}

#[test]
fn test_steady_state_creates_no_new_buffers() {
    let mut harness = Harness::new();
    let mut created = None;

    for frame in 0..50 {
        harness.begin(1.0 / 60.0);
        for i in 0..8 {
            let x = i as f32;
            harness.draw.ray(Vec3::new(x, 0.0, 0.0), Vec3::y(), WHITE, DrawOptions::default());
            harness.draw.matrix(&Mat4::new_translation(&Vec3::new(x, 1.0, 0.0)), DrawOptions::default());
        }
        harness.render();

        let stats = harness.draw.stats();
        if frame == 5 {
            created = Some(stats.vertex_lists_created);
        } else if frame > 5 {
            assert_eq!(Some(stats.vertex_lists_created), created);
        }
    }
}

#[test]
fn test_reap_and_replay_drive_a_bare_pool() {
    common::init_logger();
    let mut pool = RequestPool::new();
    let mut ctx = RecordingContext::with_bundled_shaders();
    let cache = PipelineStateCache::build(&mut ctx);
    pool.append_line_segment(PipelineKey::default(), Vec3::zeros(), Vec3::x(), WHITE, 0.0);

    assert_eq!(replay(&pool, &cache, &mut ctx).line_segments, 1);
    assert_eq!(reap(&mut pool, 0.1).line_segments, 1);
    assert!(replay(&pool, &cache, &mut ctx).is_empty());
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

#[rstest]
#[case::disabled(false, true)]
#[case::unsupported(true, false)]
#[case::both(false, false)]
fn test_closed_gate_allocates_and_draws_nothing(#[case] enabled: bool, #[case] development: bool) {
    let config = DebugDrawConfig::default()
        .with_enabled(enabled)
        .with_development(development);
    let mut harness = Harness::with_parts(config, RecordingContext::with_bundled_shaders());

    for _ in 0..3 {
        harness.begin(0.1);
        let options = DrawOptions::timed(10.0);
        harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, options);
        harness.draw.polyline(&[Vec3::zeros(), Vec3::x(), Vec3::y()], WHITE, options);
        harness.draw.grid(Vec3::zeros(), 1.0, 4, WHITE, options);
        harness.draw.ray(Vec3::zeros(), Vec3::y(), WHITE, options);
        harness.draw.wire_arc(
            Vec3::zeros(),
            Quat::identity(),
            ArcParams::ring(Vec3::x(), 0.0, 180.0, 1.0, 2.0),
            WHITE,
            options,
        );
        harness.draw.sphere(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, options);
        harness.draw.wire_capsule(Vec3::zeros(), Quat::identity(), 0.5, 2.0, WHITE, options);
        assert!(harness.draw.begin_mesh_instance(1.0, PipelineKey::default()).is_none());

        assert!(harness.render().is_empty());
        assert!(harness.ctx.commands().is_empty());
    }

    let stats = harness.draw.stats();
    assert_eq!(stats.allocations, 0);
    assert_eq!(stats.live(), 0);
    assert_eq!(harness.draw.mesh_count(), 0);
}

#[test]
fn test_reenabling_resumes_drawing() {
    let mut harness = Harness::new();
    harness.draw.set_enabled(false);
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    assert!(harness.render().is_empty());

    harness.draw.set_enabled(true);
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    assert_eq!(harness.render().line_segments, 1);
}

// ---------------------------------------------------------------------------
// Views and degraded contexts
// ---------------------------------------------------------------------------

#[rstest]
#[case::main_game(ViewInfo::main_game(), true)]
#[case::scene_view(ViewInfo::scene_view(), true)]
#[case::secondary_game(ViewInfo::new(ViewKind::Game, false), false)]
#[case::preview(ViewInfo::new(ViewKind::Preview, false), false)]
#[case::reflection(ViewInfo::new(ViewKind::Reflection, false), false)]
fn test_only_eligible_views_replay(#[case] view: ViewInfo, #[case] drawn: bool) {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    let stats = harness.draw.render(&view, &mut harness.ctx);
    assert_eq!(stats.line_segments == 1, drawn);
}

#[test]
fn test_missing_shaded_shader_degrades_to_colored() {
    let mut ctx = RecordingContext::new();
    ctx.register_shader(COLORED_SHADER);
    let mut harness = Harness::with_parts(DebugDrawConfig::development(), ctx);

    harness.begin(0.1);
    harness.draw.cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, DrawOptions::default());
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    let stats = harness.render();
    assert_eq!(stats.mesh_draws, 1);
    assert_eq!(stats.line_segments, 1);
    assert_eq!(stats.skipped, 0);
}

#[test]
fn test_no_shaders_at_all_never_aborts_the_frame() {
    let mut harness = Harness::with_parts(DebugDrawConfig::development(), RecordingContext::new());

    for _ in 0..3 {
        harness.begin(0.1);
        harness.draw.cube(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, DrawOptions::default());
        harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
        let stats = harness.render();
        assert!(stats.is_empty());
        assert_eq!(stats.skipped, 2);
    }
    // Entries still age and are reaped normally.
    harness.begin(0.1);
    assert_eq!(harness.draw.stats().live(), 0);
}

#[test]
fn test_failed_material_creation_skips_entries() {
    let mut ctx = RecordingContext::with_bundled_shaders();
    ctx.set_fail_material_creation(true);
    let mut harness = Harness::with_parts(DebugDrawConfig::development(), ctx);

    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    let stats = harness.render();
    assert!(stats.is_empty());
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_shutdown_then_reuse() {
    let mut harness = Harness::new();
    harness.begin(0.1);
    harness.draw.sphere(Vec3::zeros(), Quat::identity(), Vec3::repeat(1.0), WHITE, DrawOptions::timed(5.0));
    harness.render();

    harness.draw.shutdown(&mut harness.ctx);
    assert_eq!(harness.ctx.material_count(), 0);
    assert_eq!(harness.ctx.released_mesh_count(), 1);
    assert_eq!(harness.draw.stats().live(), 0);

    // The drawer can be attached again after teardown.
    harness.begin(0.1);
    harness.draw.line(Vec3::zeros(), Vec3::x(), WHITE, DrawOptions::default());
    assert_eq!(harness.render().line_segments, 1);
}
