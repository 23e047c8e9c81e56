use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use dbgdraw::{ArcParams, DebugDraw, DebugDrawConfig, DrawOptions, FrameTime, RecordingContext, ViewInfo};
use dbgdraw_core::math::{Mat4, Quat, Vec3};

const WHITE: [f32; 4] = [1.0; 4];

fn drawer() -> DebugDraw {
    DebugDraw::new(&DebugDrawConfig::development())
}

fn submit_mixed(draw: &mut DebugDraw, count: usize) {
    for i in 0..count {
        let x = i as f32;
        draw.line(Vec3::new(x, 0.0, 0.0), Vec3::new(x, 1.0, 0.0), WHITE, DrawOptions::default());
        draw.ray(Vec3::new(x, 0.0, 1.0), Vec3::y(), WHITE, DrawOptions::default());
        draw.wire_cube(Vec3::new(x, 0.0, 2.0), Quat::identity(), Vec3::repeat(0.5), WHITE, DrawOptions::default());
        if i % 8 == 0 {
            draw.arc(
                Vec3::new(x, 0.0, 3.0),
                Quat::identity(),
                ArcParams::ring(Vec3::x(), 0.0, 270.0, 0.25, 0.5),
                WHITE,
                DrawOptions::default(),
            );
            draw.matrix(&Mat4::new_translation(&Vec3::new(x, 0.0, 4.0)), DrawOptions::default());
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

fn bench_submit_lines(c: &mut Criterion) {
    let mut draw = drawer();
    c.bench_function("submit_1000_lines_and_reap", |b| {
        b.iter(|| {
            draw.begin_frame(FrameTime::running(1.0 / 60.0));
            for i in 0..1000 {
                let x = i as f32;
                draw.line(Vec3::new(x, 0.0, 0.0), Vec3::new(x, 1.0, 0.0), WHITE, DrawOptions::default());
            }
            black_box(draw.stats());
        });
    });
}

fn bench_gate_closed(c: &mut Criterion) {
    let mut draw = DebugDraw::new(&DebugDrawConfig::default().with_development(false));
    c.bench_function("submit_mixed_gate_closed", |b| {
        b.iter(|| submit_mixed(&mut draw, black_box(100)));
    });
}

// ---------------------------------------------------------------------------
// Full frame
// ---------------------------------------------------------------------------

fn bench_steady_state_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_frame");
    for count in [10, 100, 1000] {
        let mut draw = drawer();
        let mut ctx = RecordingContext::with_bundled_shaders();
        draw.attach(&mut ctx);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                draw.begin_frame(FrameTime::running(1.0 / 60.0));
                submit_mixed(&mut draw, count);
                let stats = draw.render(&ViewInfo::main_game(), &mut ctx);
                ctx.take_commands();
                black_box(stats)
            });
        });
    }
    group.finish();
}

fn bench_timed_entries_ageing(c: &mut Criterion) {
    let mut draw = drawer();
    for i in 0..2000 {
        let x = i as f32;
        draw.line(Vec3::new(x, 0.0, 0.0), Vec3::x(), WHITE, DrawOptions::timed(f32::MAX));
    }
    c.bench_function("age_2000_long_lived_lines", |b| {
        b.iter(|| black_box(draw.begin_frame(FrameTime::running(1.0 / 60.0))));
    });
}

criterion_group!(
    benches,
    bench_submit_lines,
    bench_gate_closed,
    bench_steady_state_frame,
    bench_timed_entries_ageing
);
criterion_main!(benches);
